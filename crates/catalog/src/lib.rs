//! Catalog sources for the unlock engine.
//!
//! The built-in seed catalog, JSON catalog files, and static validation of
//! both.

#![warn(missing_docs)]

pub mod seed;
pub mod loader;
pub mod validate;

pub use loader::{from_json, to_json, load_document, load_validated};
pub use validate::{validate, CatalogIssue, CatalogReport, CatalogStats, Severity};

/// Error type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Catalog loaded but failed validation
    #[error("invalid catalog: {} error(s)", .0.with_severity(Severity::Error).count())]
    Invalid(CatalogReport),
}
