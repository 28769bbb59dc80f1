//! Phase guidance - what the user can work on next.

use aurelia_core::{Document, Element, Layer, Phase};

/// Unlocked phases, in catalog order.
pub fn available_phases(document: &Document) -> Vec<&Phase> {
    document.phases.iter().filter(|p| p.unlocked).collect()
}

/// Unlocked elements belonging to a phase.
pub fn available_elements<'a>(document: &'a Document, phase_name: &str) -> Vec<&'a Element> {
    document
        .elements
        .iter()
        .filter(|e| e.unlocked && e.category == phase_name)
        .collect()
}

/// Suggest where to go after `current`.
///
/// Once the current hierarchy has a selected element, the next more advanced
/// layer of that hierarchy is preferred if it is unlocked. Otherwise the
/// first unlocked foundational phase of another hierarchy is offered.
pub fn suggest_next_phase<'a>(document: &'a Document, current: &Phase) -> Option<&'a Phase> {
    let has_progress = document
        .selected()
        .any(|e| e.hierarchy == current.hierarchy);

    if has_progress {
        let advanced = current
            .layer
            .advanced()
            .and_then(|layer| document.phase_at(current.hierarchy, layer));
        if let Some(next) = advanced.filter(|p| p.unlocked) {
            return Some(next);
        }
    }

    document
        .phases
        .iter()
        .find(|p| p.layer == Layer::Foundational && p.unlocked && p.hierarchy != current.hierarchy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Session;
    use aurelia_core::ElementId;

    fn session() -> Session {
        Session::new(aurelia_catalog::seed::document())
    }

    #[test]
    fn test_available_phases_start_with_foundations() {
        let s = session();
        let names: Vec<&str> = available_phases(s.document())
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["Moods", "Frameworks", "Settings"]);
    }

    #[test]
    fn test_available_elements_filters_locked() {
        let mut s = session();
        assert!(available_elements(s.document(), "Skills").is_empty());

        s.toggle(&ElementId::from("m2")).unwrap();
        let skills: Vec<&str> = available_elements(s.document(), "Skills")
            .iter()
            .map(|e| e.id.as_str())
            .collect();
        assert_eq!(skills, vec!["h2"]);
    }

    #[test]
    fn test_suggest_advances_within_hierarchy() {
        let mut s = session();
        s.toggle(&ElementId::from("m1")).unwrap();

        let moods = s.document().phase("Moods").unwrap().clone();
        let next = suggest_next_phase(s.document(), &moods).unwrap();
        assert_eq!(next.name, "Skills");
    }

    #[test]
    fn test_suggest_switches_hierarchy_without_progress() {
        let s = session();
        let moods = s.document().phase("Moods").unwrap().clone();
        let next = suggest_next_phase(s.document(), &moods).unwrap();
        assert_eq!(next.name, "Frameworks");
    }

    #[test]
    fn test_suggest_from_mastery_falls_back_to_foundations() {
        let mut s = session();
        s.toggle(&ElementId::from("f1")).unwrap();
        let methods = s.document().phase("Methods").unwrap().clone();
        let next = suggest_next_phase(s.document(), &methods).unwrap();
        assert_eq!(next.name, "Moods");
    }
}
