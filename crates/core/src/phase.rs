//! Phase model - named (hierarchy, layer) buckets of elements.

use serde::{Deserialize, Serialize};
use crate::element::{Hierarchy, Layer};

/// A phase groups the elements whose `category` equals its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Track
    pub hierarchy: Hierarchy,

    /// Depth
    pub layer: Layer,

    /// Phase name, also the category key of its elements
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Names of phases that need at least one selected element first
    #[serde(default)]
    pub requirements: Vec<String>,

    /// Derived; see the unlock engine
    #[serde(default)]
    pub unlocked: bool,
}

impl Phase {
    /// Create a phase with no requirements.
    pub fn new(hierarchy: Hierarchy, layer: Layer, name: impl Into<String>) -> Self {
        Self {
            hierarchy,
            layer,
            name: name.into(),
            description: String::new(),
            requirements: Vec::new(),
            unlocked: false,
        }
    }

    /// Set description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Add a required phase name.
    pub fn requires(mut self, phase_name: impl Into<String>) -> Self {
        self.requirements.push(phase_name.into());
        self
    }
}
