//! Element model - selectable content units.

use serde::{Deserialize, Serialize};
use crate::id::ElementId;

/// Top-level categorical track. Not an ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hierarchy {
    /// Emotional and cognitive foundations
    Developmental,
    /// Therapeutic practices
    Wellness,
    /// Narrative and sensory elements
    Aesthetic,
}

impl Hierarchy {
    /// All hierarchies in display order.
    pub const ALL: [Hierarchy; 3] = [
        Hierarchy::Developmental,
        Hierarchy::Wellness,
        Hierarchy::Aesthetic,
    ];

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Hierarchy::Developmental => "developmental",
            Hierarchy::Wellness => "wellness",
            Hierarchy::Aesthetic => "aesthetic",
        }
    }
}

impl std::fmt::Display for Hierarchy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Hierarchy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "developmental" => Ok(Hierarchy::Developmental),
            "wellness" => Ok(Hierarchy::Wellness),
            "aesthetic" => Ok(Hierarchy::Aesthetic),
            other => Err(format!("unknown hierarchy: {other}")),
        }
    }
}

/// Depth within a hierarchy.
///
/// The numbering is inverted: layer 3 is foundational and layer 1 is
/// mastery, so a *lower* number means a *more advanced* layer. Serialized
/// as the bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Layer {
    /// Layer 1
    Mastery,
    /// Layer 2
    Intermediate,
    /// Layer 3, no prerequisites
    Foundational,
}

impl Layer {
    /// Numeric layer as used in catalogs.
    pub fn number(self) -> u8 {
        match self {
            Layer::Mastery => 1,
            Layer::Intermediate => 2,
            Layer::Foundational => 3,
        }
    }

    /// The next more advanced layer, if any.
    pub fn advanced(self) -> Option<Layer> {
        match self {
            Layer::Foundational => Some(Layer::Intermediate),
            Layer::Intermediate => Some(Layer::Mastery),
            Layer::Mastery => None,
        }
    }

    /// Human label.
    pub fn label(self) -> &'static str {
        match self {
            Layer::Mastery => "mastery",
            Layer::Intermediate => "intermediate",
            Layer::Foundational => "foundational",
        }
    }
}

impl TryFrom<u8> for Layer {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Layer::Mastery),
            2 => Ok(Layer::Intermediate),
            3 => Ok(Layer::Foundational),
            other => Err(format!("layer must be 1, 2 or 3, got {other}")),
        }
    }
}

impl From<Layer> for u8 {
    fn from(layer: Layer) -> u8 {
        layer.number()
    }
}

/// A selectable content unit, gated by prerequisite elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    /// Catalog key
    pub id: ElementId,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Track this element belongs to
    pub hierarchy: Hierarchy,

    /// Depth within the hierarchy
    pub layer: Layer,

    /// Name of the phase grouping this element
    pub category: String,

    /// Elements that must be selected before this one unlocks
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<ElementId>,

    /// Development horizon, e.g. "hours/days"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temporal: Option<String>,

    /// Chosen by the user
    #[serde(default)]
    pub selected: bool,

    /// Derived; see the unlock engine
    #[serde(default)]
    pub unlocked: bool,
}

impl Element {
    /// Create an unselected element with no dependencies.
    pub fn new(
        id: impl Into<ElementId>,
        name: impl Into<String>,
        hierarchy: Hierarchy,
        layer: Layer,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            hierarchy,
            layer,
            category: category.into(),
            dependencies: Vec::new(),
            temporal: None,
            selected: false,
            unlocked: false,
        }
    }

    /// Set description.
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Set prerequisite elements.
    pub fn with_dependencies<I, D>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = D>,
        D: Into<ElementId>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Set development horizon.
    pub fn with_temporal(mut self, temporal: impl Into<String>) -> Self {
        self.temporal = Some(temporal.into());
        self
    }

    /// Whether this element has no prerequisites.
    pub fn is_root(&self) -> bool {
        self.dependencies.is_empty()
    }
}
