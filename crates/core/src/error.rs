//! Rejections raised by selection toggles.

use crate::id::ElementId;

/// Why a selection toggle was refused.
///
/// Both variants are local and recoverable; the document is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ToggleError {
    /// No element with that id exists in the catalog
    #[error("element not found: {0}")]
    NotFound(ElementId),

    /// The element's prerequisites are not all selected
    #[error("element is locked: {0}")]
    Locked(ElementId),
}

impl ToggleError {
    /// Element id the toggle was attempted on.
    pub fn element_id(&self) -> &ElementId {
        match self {
            ToggleError::NotFound(id) | ToggleError::Locked(id) => id,
        }
    }

    /// Notice to show the user.
    pub fn notice(&self) -> &'static str {
        match self {
            ToggleError::NotFound(_) => "This element is not part of the catalog.",
            ToggleError::Locked(_) => "This element needs prerequisites to be unlocked first!",
        }
    }
}
