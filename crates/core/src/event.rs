//! Selection events - the session timeline.

use crate::element::Element;
use crate::id::{ElementId, EventId};
use crate::Time;
use serde::{Deserialize, Serialize};

/// What happened to an element's selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionKind {
    /// User selected the element
    Selected,
    /// User deselected the element
    Deselected,
    /// Deselected because a prerequisite went away
    CascadeDeselected,
    /// Toggle refused; the element is locked or unknown
    Rejected,
}

/// An atomic change to the selection, with the notice shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionEvent {
    /// Unique identifier
    pub id: EventId,

    /// When it happened
    pub timestamp: Time,

    /// Element concerned
    pub element_id: ElementId,

    /// Kind of change
    pub kind: SelectionKind,

    /// User-facing notice
    pub message: String,
}

impl SelectionEvent {
    /// Create a new event.
    pub fn new(element_id: ElementId, kind: SelectionKind, message: impl Into<String>) -> Self {
        Self {
            id: EventId::new(),
            timestamp: chrono::Utc::now(),
            element_id,
            kind,
            message: message.into(),
        }
    }

    /// Event for an element that was just selected.
    pub fn selected(element: &Element) -> Self {
        let message = if element.is_root() {
            format!(
                "Added \"{}\" to your {}. This {} element will contribute to your script's {} development.",
                element.name,
                element.category,
                element.hierarchy,
                element.temporal.as_deref().unwrap_or("overall"),
            )
        } else {
            format!(
                "Added \"{}\" to your {}. This {} element will build upon your selected foundations and contribute to your script's {} development.",
                element.name,
                element.category,
                element.hierarchy,
                element.temporal.as_deref().unwrap_or("overall"),
            )
        };
        Self::new(element.id.clone(), SelectionKind::Selected, message)
    }

    /// Event for an element that was just deselected by the user.
    pub fn deselected(element: &Element) -> Self {
        Self::new(
            element.id.clone(),
            SelectionKind::Deselected,
            format!("Removed \"{}\" from your selections.", element.name),
        )
    }

    /// Event for an element dropped because its prerequisites are gone.
    pub fn cascaded(element: &Element) -> Self {
        Self::new(
            element.id.clone(),
            SelectionKind::CascadeDeselected,
            format!(
                "Removed \"{}\" because its prerequisites are no longer selected.",
                element.name
            ),
        )
    }
}
