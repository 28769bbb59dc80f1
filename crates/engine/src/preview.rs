//! Script preview - a structural summary of the current selection.

use aurelia_core::{Document, Element, Hierarchy, Layer};
use serde::{Deserialize, Serialize};

/// Selections at which a script counts as complete.
const IDEAL_ELEMENT_COUNT: f32 = 6.0;

/// Preview errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// Nothing to build a script from
    #[error("select some elements first")]
    NothingSelected,
}

/// Share of the selection per hierarchy, in percent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyBalance {
    /// Developmental share
    pub developmental: f32,
    /// Wellness share
    pub wellness: f32,
    /// Aesthetic share
    pub aesthetic: f32,
}

impl HierarchyBalance {
    /// Share of one hierarchy.
    pub fn get(&self, hierarchy: Hierarchy) -> f32 {
        match hierarchy {
            Hierarchy::Developmental => self.developmental,
            Hierarchy::Wellness => self.wellness,
            Hierarchy::Aesthetic => self.aesthetic,
        }
    }
}

/// One timed section of the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptSection {
    /// Section title
    pub name: String,
    /// Narration outline
    pub content: String,
    /// Display duration
    pub duration: String,
    /// Names of the elements woven into this section
    pub elements: Vec<String>,
}

/// Summary of a script built from the selected elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptPreview {
    /// Title
    pub title: String,
    /// Display duration
    pub duration: String,
    /// Target word count
    pub word_count: u32,
    /// 0-100, saturating at six selections
    pub completion_score: f32,
    /// Selection share per hierarchy
    pub hierarchy_balance: HierarchyBalance,
    /// Sections in playback order
    pub sections: Vec<ScriptSection>,
}

impl ScriptPreview {
    /// Build a preview from a document's selection.
    pub fn build(document: &Document) -> Result<Self, PreviewError> {
        let selected: Vec<&Element> = document.selected().collect();
        if selected.is_empty() {
            return Err(PreviewError::NothingSelected);
        }

        let total = selected.len() as f32;
        let share = |h: Hierarchy| {
            selected.iter().filter(|e| e.hierarchy == h).count() as f32 / total * 100.0
        };
        let names_at = |layer: Layer| {
            selected
                .iter()
                .filter(|e| e.layer == layer)
                .map(|e| e.name.clone())
                .collect::<Vec<_>>()
        };

        let sections = vec![
            ScriptSection {
                name: "Foundation Setting".to_string(),
                content: "We begin by establishing your foundational state, drawing upon the elements you've selected...".to_string(),
                duration: "3 min".to_string(),
                elements: names_at(Layer::Foundational),
            },
            ScriptSection {
                name: "Skill Integration".to_string(),
                content: "Now we activate your behavioral patterns, building upon the foundation we've created...".to_string(),
                duration: "5 min".to_string(),
                elements: names_at(Layer::Intermediate),
            },
            ScriptSection {
                name: "Mastery Expression".to_string(),
                content: "Finally, we integrate these elements into lasting mastery and transformation...".to_string(),
                duration: "4 min".to_string(),
                elements: names_at(Layer::Mastery),
            },
            ScriptSection {
                name: "Integration & Closing".to_string(),
                content: "We complete this journey by anchoring these new patterns into your daily life...".to_string(),
                duration: "3 min".to_string(),
                elements: selected.iter().map(|e| e.name.clone()).collect(),
            },
        ];

        Ok(Self {
            title: "AURELIA Wellness Journey".to_string(),
            duration: "10-15 minutes".to_string(),
            word_count: 650,
            completion_score: (total / IDEAL_ELEMENT_COUNT * 100.0).min(100.0),
            hierarchy_balance: HierarchyBalance {
                developmental: share(Hierarchy::Developmental),
                wellness: share(Hierarchy::Wellness),
                aesthetic: share(Hierarchy::Aesthetic),
            },
            sections,
        })
    }
}
