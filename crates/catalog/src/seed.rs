//! The built-in catalog: nine phases across three hierarchies and the
//! sixteen elements that populate them.

use aurelia_core::{Document, Element, Phase};

use aurelia_core::Hierarchy::{Aesthetic, Developmental, Wellness};
use aurelia_core::Layer::{Foundational, Intermediate, Mastery};

/// Title given to documents seeded from the built-in catalog.
pub const DEFAULT_TITLE: &str = "Aurelia Wellness Script";

/// Built-in phases, foundational layer first.
pub fn phases() -> Vec<Phase> {
    vec![
        Phase::new(Developmental, Foundational, "Moods")
            .with_description("Fundamental emotional and cognitive states"),
        Phase::new(Wellness, Foundational, "Frameworks")
            .with_description("Conceptual narratives and thematic contexts"),
        Phase::new(Aesthetic, Foundational, "Settings")
            .with_description("Foundational sensory environments"),
        Phase::new(Developmental, Intermediate, "Skills")
            .with_description("Consistent behavioral patterns")
            .requires("Moods"),
        Phase::new(Wellness, Intermediate, "Techniques")
            .with_description("Specific, actionable exercises")
            .requires("Frameworks"),
        Phase::new(Aesthetic, Intermediate, "Styles & Tones")
            .with_description("Linguistic and emotional frameworks")
            .requires("Settings"),
        Phase::new(Developmental, Mastery, "Concepts")
            .with_description("High-level cognitive and behavioral mastery")
            .requires("Skills"),
        Phase::new(Wellness, Mastery, "Methods")
            .with_description("Macro-level wellness practices")
            .requires("Techniques"),
        Phase::new(Aesthetic, Mastery, "Archetypes")
            .with_description("Integrated narrative personas")
            .requires("Styles & Tones"),
    ]
}

/// Built-in elements, grouped by hierarchy.
pub fn elements() -> Vec<Element> {
    vec![
        // Developmental
        Element::new("m1", "Calm Awareness", Developmental, Foundational, "Moods")
            .with_description("Sustained state of peaceful attention")
            .with_temporal("hours/days"),
        Element::new("m2", "Grounded Presence", Developmental, Foundational, "Moods")
            .with_description("Deep connection to present moment")
            .with_temporal("hours/days"),
        Element::new("m3", "Open Receptivity", Developmental, Foundational, "Moods")
            .with_description("Willingness to receive new experiences")
            .with_temporal("hours/days"),
        Element::new("h1", "Mindful Breathing", Developmental, Intermediate, "Skills")
            .with_description("Consistent breath awareness practice")
            .with_dependencies(["m1"])
            .with_temporal("days/weeks"),
        Element::new("h2", "Body Scanning", Developmental, Intermediate, "Skills")
            .with_description("Systematic awareness of physical sensations")
            .with_dependencies(["m2"])
            .with_temporal("days/weeks"),
        Element::new("sk1", "Stress Mastery", Developmental, Mastery, "Concepts")
            .with_description("Complete integration of stress management")
            .with_dependencies(["h1", "h2"])
            .with_temporal("weeks/months"),
        // Wellness
        Element::new("f1", "Chakra System", Wellness, Foundational, "Frameworks")
            .with_description("Energy center framework for healing"),
        Element::new("f2", "Four Elements", Wellness, Foundational, "Frameworks")
            .with_description("Earth, water, fire, air balancing"),
        Element::new("t1", "Progressive Relaxation", Wellness, Intermediate, "Techniques")
            .with_description("Systematic muscle tension release")
            .with_dependencies(["f1"]),
        Element::new("t2", "Visualization Journey", Wellness, Intermediate, "Techniques")
            .with_description("Guided imagery for transformation")
            .with_dependencies(["f2"]),
        Element::new("me1", "Holistic Healing", Wellness, Mastery, "Methods")
            .with_description("Integrated wellness approach")
            .with_dependencies(["t1", "t2"]),
        // Aesthetic
        Element::new("se1", "Forest Sanctuary", Aesthetic, Foundational, "Settings")
            .with_description("Peaceful woodland environment"),
        Element::new("se2", "Ocean Depths", Aesthetic, Foundational, "Settings")
            .with_description("Calming underwater setting"),
        Element::new("st1", "Nurturing Guide", Aesthetic, Intermediate, "Styles & Tones")
            .with_description("Warm, supportive vocal style")
            .with_dependencies(["se1"]),
        Element::new("st2", "Wise Teacher", Aesthetic, Intermediate, "Styles & Tones")
            .with_description("Knowledgeable, patient tone")
            .with_dependencies(["se2"]),
        Element::new("a1", "The Healer", Aesthetic, Mastery, "Archetypes")
            .with_description("Compassionate healing presence")
            .with_dependencies(["st1", "st2"]),
    ]
}

/// A fresh document over the built-in catalog, nothing selected.
///
/// Unlock flags match an empty selection: foundational phases and
/// elements start unlocked, everything else locked.
pub fn document() -> Document {
    let mut phases = phases();
    for phase in phases.iter_mut() {
        phase.unlocked = phase.requirements.is_empty();
    }
    let mut elements = elements();
    for element in elements.iter_mut() {
        element.unlocked = element.is_root();
    }
    Document::new(DEFAULT_TITLE, phases, elements)
}

#[cfg(test)]
mod tests {
    use super::*;
    use aurelia_core::{ElementId, Layer};

    #[test]
    fn test_seed_shape() {
        let doc = document();
        assert_eq!(doc.phases.len(), 9);
        assert_eq!(doc.elements.len(), 16);
        assert!(doc.elements.iter().all(|e| !e.selected));
    }

    #[test]
    fn test_seed_starting_flags() {
        let doc = document();
        let m1 = doc.element(&ElementId::from("m1")).unwrap();
        assert_eq!(m1.name, "Calm Awareness");
        assert!(m1.unlocked);

        let h1 = doc.element(&ElementId::from("h1")).unwrap();
        assert_eq!(h1.name, "Mindful Breathing");
        assert_eq!(h1.dependencies, vec![ElementId::from("m1")]);
        assert!(!h1.unlocked);

        let skills = doc.phase("Skills").unwrap();
        assert_eq!(skills.requirements, vec!["Moods".to_string()]);
        assert!(!skills.unlocked);
    }

    #[test]
    fn test_foundational_elements_have_no_dependencies() {
        for element in elements() {
            assert_eq!(element.layer == Layer::Foundational, element.is_root(), "{}", element.id);
        }
    }
}
