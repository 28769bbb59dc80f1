//! Aurelia core data models.
//!
//! This crate defines the elements, phases and documents that the unlock
//! engine operates on.

#![warn(missing_docs)]

// Core identities
mod id;

// Catalog model
mod element;
mod phase;
mod document;

// Selection timeline
mod event;
mod error;

// Re-exports
pub use id::*;

pub use element::{Element, Hierarchy, Layer};
pub use phase::Phase;
pub use document::Document;

pub use event::{SelectionEvent, SelectionKind};
pub use error::ToggleError;

/// Timestamp type
pub type Time = chrono::DateTime<chrono::Utc>;
