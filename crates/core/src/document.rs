//! Document model - the serializable unit of editing state.

use serde::{Deserialize, Serialize};
use crate::element::{Element, Hierarchy, Layer};
use crate::id::{DocumentId, ElementId};
use crate::phase::Phase;

/// A wellness script under construction: the catalog plus the current
/// selection, carried as the `selected` flags of its elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier
    #[serde(default)]
    pub id: DocumentId,

    /// Title
    #[serde(default)]
    pub title: String,

    /// Phases in catalog order
    pub phases: Vec<Phase>,

    /// Elements in catalog order
    pub elements: Vec<Element>,
}

impl Document {
    /// Create a document from catalog data.
    pub fn new(title: impl Into<String>, phases: Vec<Phase>, elements: Vec<Element>) -> Self {
        Self {
            id: DocumentId::new(),
            title: title.into(),
            phases,
            elements,
        }
    }

    /// Find an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Find a phase by name.
    pub fn phase(&self, name: &str) -> Option<&Phase> {
        self.phases.iter().find(|p| p.name == name)
    }

    /// Phase of a given hierarchy and layer.
    pub fn phase_at(&self, hierarchy: Hierarchy, layer: Layer) -> Option<&Phase> {
        self.phases
            .iter()
            .find(|p| p.hierarchy == hierarchy && p.layer == layer)
    }

    /// Currently selected elements, in catalog order.
    pub fn selected(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter().filter(|e| e.selected)
    }

    /// Elements belonging to a phase.
    pub fn elements_in<'a>(&'a self, phase_name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.elements.iter().filter(move |e| e.category == phase_name)
    }

    /// Number of selected elements.
    pub fn selected_count(&self) -> usize {
        self.selected().count()
    }
}
