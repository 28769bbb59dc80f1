//! The editing session - single owner of a document's selection state.

use crate::policy::{cascade_deselect, DeselectPolicy};
use crate::unlock::{recompute, recompute_document, toggle_selection};
use aurelia_core::{Document, Element, ElementId, Phase, SelectionEvent, SelectionKind, ToggleError};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Configuration for an editing session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// What to do with dependents when a prerequisite is deselected
    pub deselect_policy: DeselectPolicy,
    /// Whether rejected toggles are kept in the event log
    pub record_rejections: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            deselect_policy: DeselectPolicy::Preserve,
            record_rejections: true,
        }
    }
}

/// Events produced by one accepted toggle.
#[derive(Debug, Clone)]
pub struct ToggleOutcome {
    /// The user's own selection change
    pub event: SelectionEvent,
    /// Dependents dropped by the cascade policy
    pub cascaded: Vec<SelectionEvent>,
}

impl ToggleOutcome {
    /// Whether the toggled element ended up selected.
    pub fn selected(&self) -> bool {
        self.event.kind == SelectionKind::Selected
    }
}

/// Owns a document and applies the one state transition it supports:
///
/// ```text
/// toggle → recompute → (cascade, per policy)
/// ```
///
/// Every mutation takes `&mut self`, so there is exactly one writer.
#[derive(Debug, Clone)]
pub struct Session {
    document: Document,
    config: EngineConfig,
    events: Vec<SelectionEvent>,
}

impl Session {
    /// Start a session. Derived flags are recomputed immediately so a
    /// catalog with stale `unlocked` values is corrected on load.
    pub fn new(document: Document) -> Self {
        let document = recompute_document(&document);
        info!(
            "Session started for {} ({} elements, {} phases)",
            document.id,
            document.elements.len(),
            document.phases.len()
        );
        Self {
            document,
            config: EngineConfig::default(),
            events: Vec::new(),
        }
    }

    /// Set the configuration.
    ///
    /// Under [`DeselectPolicy::Cascade`] the document is brought into line
    /// immediately: selections that are already locked are dropped and
    /// logged as cascade events, not charged to a later toggle.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        if self.config.deselect_policy == DeselectPolicy::Cascade {
            self.settle();
        }
        self
    }

    fn settle(&mut self) {
        let cascade = cascade_deselect(&self.document.elements, &self.document.phases);
        self.document.elements = cascade.elements;
        self.document.phases = cascade.phases;
        if cascade.dropped.is_empty() {
            return;
        }

        info!(
            "Dropped {} locked selections from {}",
            cascade.dropped.len(),
            self.document.id
        );
        let events: Vec<SelectionEvent> = cascade
            .dropped
            .iter()
            .filter_map(|id| self.document.element(id))
            .map(SelectionEvent::cascaded)
            .collect();
        self.events.extend(events);
    }

    /// Toggle one element's selection.
    ///
    /// On rejection the document is unchanged and the error carries the
    /// notice for the user.
    pub fn toggle(&mut self, id: &ElementId) -> Result<ToggleOutcome, ToggleError> {
        let toggled = match toggle_selection(&self.document.elements, id) {
            Ok(elements) => elements,
            Err(err) => {
                warn!("Rejected toggle of {}: {}", id, err);
                if self.config.record_rejections {
                    self.events.push(SelectionEvent::new(
                        id.clone(),
                        SelectionKind::Rejected,
                        err.notice(),
                    ));
                }
                return Err(err);
            }
        };

        let (elements, phases, dropped) = match self.config.deselect_policy {
            DeselectPolicy::Preserve => {
                let (elements, phases) = recompute(&toggled, &self.document.phases);
                (elements, phases, Vec::new())
            }
            DeselectPolicy::Cascade => {
                let cascade = cascade_deselect(&toggled, &self.document.phases);
                (cascade.elements, cascade.phases, cascade.dropped)
            }
        };

        self.document.elements = elements;
        self.document.phases = phases;

        let element = self.lookup(id)?;
        let event = if element.selected {
            SelectionEvent::selected(element)
        } else {
            SelectionEvent::deselected(element)
        };
        debug!("{}", event.message);

        let cascaded: Vec<SelectionEvent> = dropped
            .iter()
            .filter_map(|dep| self.document.element(dep))
            .map(SelectionEvent::cascaded)
            .collect();
        if !cascaded.is_empty() {
            info!("Deselecting {} cascaded {} dependents", id, cascaded.len());
        }

        self.events.push(event.clone());
        self.events.extend(cascaded.iter().cloned());

        Ok(ToggleOutcome { event, cascaded })
    }

    /// Make sure an element is selected, toggling only if it is not.
    pub fn select(&mut self, id: &ElementId) -> Result<Option<ToggleOutcome>, ToggleError> {
        if self.lookup(id)?.selected {
            return Ok(None);
        }
        self.toggle(id).map(Some)
    }

    /// Clear every selection and start a fresh event log.
    pub fn reset(&mut self) {
        for element in self.document.elements.iter_mut() {
            element.selected = false;
        }
        self.document = recompute_document(&self.document);
        self.events.clear();
        info!("Session {} reset", self.document.id);
    }

    fn lookup(&self, id: &ElementId) -> Result<&Element, ToggleError> {
        self.document
            .element(id)
            .ok_or_else(|| ToggleError::NotFound(id.clone()))
    }

    /// Current document.
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Give up the session, keeping the document.
    pub fn into_document(self) -> Document {
        self.document
    }

    /// Active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Event log, oldest first.
    pub fn events(&self) -> &[SelectionEvent] {
        &self.events
    }

    /// Selected elements in catalog order.
    pub fn selected(&self) -> Vec<&Element> {
        self.document.selected().collect()
    }

    /// Unlocked phases in catalog order.
    pub fn unlocked_phases(&self) -> Vec<&Phase> {
        self.document.phases.iter().filter(|p| p.unlocked).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unlock::is_consistent;

    fn session() -> Session {
        Session::new(aurelia_catalog::seed::document())
    }

    fn id(s: &str) -> ElementId {
        ElementId::from(s)
    }

    fn element<'a>(session: &'a Session, key: &str) -> &'a Element {
        session.document().element(&id(key)).unwrap()
    }

    #[test]
    fn test_seed_scenario_calm_awareness_unlocks_breathing() {
        let mut s = session();
        assert!(element(&s, "m1").unlocked);
        assert!(!element(&s, "h1").unlocked);

        s.toggle(&id("m1")).unwrap();
        assert!(element(&s, "h1").unlocked);

        s.toggle(&id("h1")).unwrap();
        let outcome = s.toggle(&id("m1")).unwrap();
        assert!(!outcome.selected());
        assert!(outcome.cascaded.is_empty());

        let h1 = element(&s, "h1");
        assert!(!h1.unlocked);
        assert!(h1.selected);
        assert!(is_consistent(s.document()));
    }

    #[test]
    fn test_seed_scenario_skills_phase() {
        let mut s = session();
        assert!(!s.document().phase("Skills").unwrap().unlocked);

        s.toggle(&id("m1")).unwrap();
        assert!(s.document().phase("Skills").unwrap().unlocked);
        assert!(!s.document().phase("Concepts").unwrap().unlocked);
    }

    #[test]
    fn test_rejected_toggle_leaves_document_unchanged() {
        let mut s = session();
        let before = s.document().clone();

        let err = s.toggle(&id("sk1")).unwrap_err();
        assert_eq!(err, ToggleError::Locked(id("sk1")));
        assert_eq!(s.document(), &before);

        let err = s.toggle(&id("nope")).unwrap_err();
        assert_eq!(err, ToggleError::NotFound(id("nope")));
        assert_eq!(s.document(), &before);

        let kinds: Vec<_> = s.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![SelectionKind::Rejected, SelectionKind::Rejected]);
    }

    #[test]
    fn test_rejections_not_recorded_when_disabled() {
        let mut s = session().with_config(EngineConfig {
            record_rejections: false,
            ..Default::default()
        });
        assert!(s.toggle(&id("a1")).is_err());
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_cascade_policy_drops_dependents() {
        let mut s = session().with_config(EngineConfig {
            deselect_policy: DeselectPolicy::Cascade,
            ..Default::default()
        });
        for key in ["m1", "m2", "h1", "h2", "sk1"] {
            s.toggle(&id(key)).unwrap();
        }

        let outcome = s.toggle(&id("m1")).unwrap();
        let dropped: Vec<&str> = outcome.cascaded.iter().map(|e| e.element_id.as_str()).collect();
        assert_eq!(dropped, vec!["h1", "sk1"]);

        assert!(!element(&s, "h1").selected);
        assert!(!element(&s, "sk1").selected);
        assert!(element(&s, "h2").selected);
        assert!(s.selected().iter().all(|e| e.unlocked));
    }

    #[test]
    fn test_cascade_config_drops_stale_selections_up_front() {
        let mut doc = aurelia_catalog::seed::document();
        for element in doc.elements.iter_mut() {
            if element.id == "h1" {
                element.selected = true;
            }
        }

        let mut s = Session::new(doc).with_config(EngineConfig {
            deselect_policy: DeselectPolicy::Cascade,
            ..Default::default()
        });
        assert!(!element(&s, "h1").selected);
        assert!(s.selected().is_empty());

        let kinds: Vec<_> = s.events().iter().map(|e| (e.element_id.as_str(), e.kind)).collect();
        assert_eq!(kinds, vec![("h1", SelectionKind::CascadeDeselected)]);

        let outcome = s.toggle(&id("f1")).unwrap();
        assert!(outcome.cascaded.is_empty());
    }

    #[test]
    fn test_preserve_config_keeps_stale_selections() {
        let mut doc = aurelia_catalog::seed::document();
        for element in doc.elements.iter_mut() {
            if element.id == "h1" {
                element.selected = true;
            }
        }

        let s = Session::new(doc).with_config(EngineConfig::default());
        let h1 = element(&s, "h1");
        assert!(h1.selected);
        assert!(!h1.unlocked);
        assert!(s.events().is_empty());
    }

    #[test]
    fn test_select_is_noop_when_already_selected() {
        let mut s = session();
        assert!(s.select(&id("f1")).unwrap().is_some());
        assert!(s.select(&id("f1")).unwrap().is_none());
        assert_eq!(s.selected().len(), 1);
    }

    #[test]
    fn test_event_messages() {
        let mut s = session();
        let added = s.toggle(&id("m1")).unwrap();
        assert!(added.event.message.starts_with("Added \"Calm Awareness\" to your Moods."));
        assert!(added.event.message.contains("hours/days"));

        let removed = s.toggle(&id("m1")).unwrap();
        assert_eq!(
            removed.event.message,
            "Removed \"Calm Awareness\" from your selections."
        );
    }

    #[test]
    fn test_reset_clears_selection() {
        let mut s = session();
        s.toggle(&id("se1")).unwrap();
        s.toggle(&id("st1")).unwrap();
        s.reset();
        assert!(s.selected().is_empty());
        assert!(s.events().is_empty());
        assert!(!element(&s, "st1").unlocked);
        assert_eq!(s.unlocked_phases().len(), 3);
    }

    #[test]
    fn test_new_corrects_stale_flags() {
        let mut doc = aurelia_catalog::seed::document();
        for element in doc.elements.iter_mut() {
            element.unlocked = true;
        }
        let s = Session::new(doc);
        assert!(!element(&s, "a1").unlocked);
        assert!(is_consistent(s.document()));
    }

    #[test]
    fn test_config_deserializes_with_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"deselect_policy":"cascade"}"#).unwrap();
        assert_eq!(config.deselect_policy, DeselectPolicy::Cascade);
        assert!(config.record_rejections);
    }
}
