//! Unlock engine - dependency gating, selection sessions and guidance.

#![warn(missing_docs)]

pub mod unlock;
pub mod policy;
pub mod session;
pub mod guide;
pub mod preview;

pub use unlock::{recompute, recompute_document, toggle_selection, resolve, is_consistent, Resolution};
pub use policy::{DeselectPolicy, Cascade, cascade_deselect};
pub use session::{Session, EngineConfig, ToggleOutcome};
pub use guide::{available_phases, available_elements, suggest_next_phase};
pub use preview::{ScriptPreview, ScriptSection, HierarchyBalance, PreviewError};
