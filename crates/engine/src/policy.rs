//! What happens to dependents when a prerequisite is deselected.

use crate::unlock::recompute;
use aurelia_core::{Element, ElementId, Phase};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Deselect behaviour for elements whose prerequisites disappear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeselectPolicy {
    /// Dependents stay selected but show as locked
    #[default]
    Preserve,
    /// Dependents that become locked are deselected, transitively
    Cascade,
}

impl DeselectPolicy {
    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeselectPolicy::Preserve => "preserve",
            DeselectPolicy::Cascade => "cascade",
        }
    }
}

impl std::fmt::Display for DeselectPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for DeselectPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "preserve" => Ok(DeselectPolicy::Preserve),
            "cascade" => Ok(DeselectPolicy::Cascade),
            other => Err(format!("unknown deselect policy: {other}")),
        }
    }
}

/// Result of a cascade pass.
#[derive(Debug, Clone)]
pub struct Cascade {
    /// Elements after the pass, flags consistent
    pub elements: Vec<Element>,
    /// Phases after the pass, flags consistent
    pub phases: Vec<Phase>,
    /// Elements deselected by the pass, in the order they were dropped
    pub dropped: Vec<ElementId>,
}

/// Deselect every selected-but-locked element until none remain.
///
/// Each round recomputes and drops the locked selections it finds, so a
/// chain `m1 <- h1 <- sk1` unwinds one link per round. Terminates because
/// every round that continues deselects at least one element.
pub fn cascade_deselect(elements: &[Element], phases: &[Phase]) -> Cascade {
    let (mut elements, mut phases) = recompute(elements, phases);
    let mut dropped = Vec::new();
    let mut round = 0usize;

    loop {
        let stale: Vec<ElementId> = elements
            .iter()
            .filter(|e| e.selected && !e.unlocked)
            .map(|e| e.id.clone())
            .collect();

        if stale.is_empty() {
            break;
        }

        round += 1;
        debug!("Cascade round {}: dropping {:?}", round, stale);

        for element in elements.iter_mut() {
            if stale.contains(&element.id) {
                element.selected = false;
            }
        }
        dropped.extend(stale);

        (elements, phases) = recompute(&elements, &phases);
    }

    Cascade { elements, phases, dropped }
}
