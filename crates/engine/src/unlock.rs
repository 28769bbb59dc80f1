//! Unlock evaluation for elements and phases.
//!
//! Everything here is a pure function of its inputs: the derived `unlocked`
//! flags are recomputed from the `selected` flags and nothing else.

use aurelia_core::{Document, Element, ElementId, Phase, ToggleError};
use std::collections::HashSet;

/// Result of evaluating one element's prerequisites.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// All prerequisites selected (or none declared)
    Ready,
    /// Waiting on these prerequisites
    Blocked(Vec<ElementId>),
}

/// Selection facts a recompute needs, gathered once per pass.
struct SelectionIndex<'a> {
    ids: HashSet<&'a ElementId>,
    categories: HashSet<&'a str>,
}

impl<'a> SelectionIndex<'a> {
    fn build(elements: &'a [Element]) -> Self {
        let selected = elements.iter().filter(|e| e.selected);
        let mut ids = HashSet::new();
        let mut categories = HashSet::new();
        for element in selected {
            ids.insert(&element.id);
            categories.insert(element.category.as_str());
        }
        Self { ids, categories }
    }
}

/// Recompute every `unlocked` flag from the current selection.
///
/// Only `unlocked` differs between input and output. Dependency ids and
/// requirement names that match nothing are never satisfied.
pub fn recompute(elements: &[Element], phases: &[Phase]) -> (Vec<Element>, Vec<Phase>) {
    let index = SelectionIndex::build(elements);
    let phase_names: HashSet<&str> = phases.iter().map(|p| p.name.as_str()).collect();

    let elements = elements
        .iter()
        .map(|element| Element {
            unlocked: element_unlocked(element, &index),
            ..element.clone()
        })
        .collect();

    let phases = phases
        .iter()
        .map(|phase| Phase {
            unlocked: phase_unlocked(phase, &index, &phase_names),
            ..phase.clone()
        })
        .collect();

    (elements, phases)
}

/// Recompute a whole document.
pub fn recompute_document(document: &Document) -> Document {
    let (elements, phases) = recompute(&document.elements, &document.phases);
    Document {
        elements,
        phases,
        ..document.clone()
    }
}

fn element_unlocked(element: &Element, index: &SelectionIndex<'_>) -> bool {
    element.dependencies.iter().all(|dep| index.ids.contains(dep))
}

fn phase_unlocked(phase: &Phase, index: &SelectionIndex<'_>, phase_names: &HashSet<&str>) -> bool {
    // A requirement must name a known phase and have a selected element in it.
    phase.requirements.iter().all(|req| {
        phase_names.contains(req.as_str()) && index.categories.contains(req.as_str())
    })
}

/// Flip `selected` on one element.
///
/// Rejected when the id is unknown or the element is locked; the caller's
/// slice is never modified. On success only the matching element changes and
/// the caller is expected to [`recompute`] afterwards. Deselecting never
/// touches the selection of dependents.
pub fn toggle_selection(elements: &[Element], id: &ElementId) -> Result<Vec<Element>, ToggleError> {
    let target = elements
        .iter()
        .find(|e| &e.id == id)
        .ok_or_else(|| ToggleError::NotFound(id.clone()))?;

    if !target.unlocked {
        return Err(ToggleError::Locked(id.clone()));
    }

    Ok(elements
        .iter()
        .map(|e| {
            if &e.id == id {
                Element { selected: !e.selected, ..e.clone() }
            } else {
                e.clone()
            }
        })
        .collect())
}

/// Check which prerequisites of an element are still missing.
pub fn resolve(document: &Document, element: &Element) -> Resolution {
    let blocked: Vec<ElementId> = element
        .dependencies
        .iter()
        .filter(|dep| !document.element(dep).map(|e| e.selected).unwrap_or(false))
        .cloned()
        .collect();

    if blocked.is_empty() {
        Resolution::Ready
    } else {
        Resolution::Blocked(blocked)
    }
}

/// Whether every derived flag in the document matches a fresh recompute.
pub fn is_consistent(document: &Document) -> bool {
    let (elements, phases) = recompute(&document.elements, &document.phases);
    elements == document.elements && phases == document.phases
}
