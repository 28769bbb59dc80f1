//! Static catalog checks.
//!
//! The unlock engine never fails on a bad catalog: a dangling reference just
//! keeps its owner locked forever. This module finds those problems up front:
//! - Duplicate element ids and phase names
//! - Dependencies and requirements that reference nothing
//! - Element categories without a phase
//! - Dependency cycles, which make every member permanently locked

use aurelia_core::{Document, Element, ElementId, Hierarchy, Layer};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::warn;

/// How serious a catalog issue is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Severity {
    /// Works, but probably not what the author meant
    Warning,
    /// Some element or phase can never unlock, or lookups are ambiguous
    Error,
}

/// A single problem found in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CatalogIssue {
    /// Two elements share an id
    DuplicateElement(ElementId),
    /// Two phases share a name
    DuplicatePhase(String),
    /// A dependency names no element
    DanglingDependency {
        /// Element declaring the dependency
        element: ElementId,
        /// Id that matched nothing
        missing: ElementId,
    },
    /// A requirement names no phase
    DanglingRequirement {
        /// Phase declaring the requirement
        phase: String,
        /// Name that matched nothing
        missing: String,
    },
    /// An element's category matches no phase
    UnknownCategory {
        /// Element concerned
        element: ElementId,
        /// Its category
        category: String,
    },
    /// A foundational element declares dependencies
    FoundationalWithDependencies(ElementId),
    /// Element layer or hierarchy differs from its phase's
    PhaseMismatch {
        /// Element concerned
        element: ElementId,
        /// Phase it claims to belong to
        phase: String,
    },
    /// Elements that depend on each other in a loop
    Cycle(Vec<ElementId>),
}

impl CatalogIssue {
    /// Severity of this issue.
    pub fn severity(&self) -> Severity {
        match self {
            CatalogIssue::FoundationalWithDependencies(_)
            | CatalogIssue::PhaseMismatch { .. }
            | CatalogIssue::UnknownCategory { .. } => Severity::Warning,
            _ => Severity::Error,
        }
    }
}

impl std::fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogIssue::DuplicateElement(id) => write!(f, "duplicate element id '{id}'"),
            CatalogIssue::DuplicatePhase(name) => write!(f, "duplicate phase name '{name}'"),
            CatalogIssue::DanglingDependency { element, missing } => {
                write!(f, "element '{element}' depends on unknown element '{missing}'")
            }
            CatalogIssue::DanglingRequirement { phase, missing } => {
                write!(f, "phase '{phase}' requires unknown phase '{missing}'")
            }
            CatalogIssue::UnknownCategory { element, category } => {
                write!(f, "element '{element}' belongs to unknown phase '{category}'")
            }
            CatalogIssue::FoundationalWithDependencies(id) => {
                write!(f, "foundational element '{id}' declares dependencies")
            }
            CatalogIssue::PhaseMismatch { element, phase } => {
                write!(f, "element '{element}' does not match the hierarchy/layer of phase '{phase}'")
            }
            CatalogIssue::Cycle(chain) => {
                let ids: Vec<&str> = chain.iter().map(|id| id.as_str()).collect();
                write!(f, "dependency cycle: {}", ids.join(" -> "))
            }
        }
    }
}

/// Catalog statistics.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogStats {
    /// Element count
    pub elements: usize,
    /// Phase count
    pub phases: usize,
    /// Elements with no prerequisites
    pub roots: usize,
    /// Element count per hierarchy
    pub by_hierarchy: HashMap<Hierarchy, usize>,
}

/// Result of validating a catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CatalogReport {
    /// All issues, in discovery order
    pub issues: Vec<CatalogIssue>,
    /// Catalog statistics
    pub stats: CatalogStats,
}

impl CatalogReport {
    /// True when no issue is an error.
    pub fn is_valid(&self) -> bool {
        !self.issues.iter().any(|i| i.severity() == Severity::Error)
    }

    /// Issues at a given severity.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &CatalogIssue> {
        self.issues.iter().filter(move |i| i.severity() == severity)
    }

    /// Dependency cycles found.
    pub fn cycles(&self) -> Vec<&[ElementId]> {
        self.issues
            .iter()
            .filter_map(|i| match i {
                CatalogIssue::Cycle(chain) => Some(chain.as_slice()),
                _ => None,
            })
            .collect()
    }
}

/// Validate a catalog document.
pub fn validate(document: &Document) -> CatalogReport {
    let mut issues = Vec::new();

    let mut element_ids = HashSet::new();
    for element in &document.elements {
        if !element_ids.insert(&element.id) {
            issues.push(CatalogIssue::DuplicateElement(element.id.clone()));
        }
    }

    let mut phase_names = HashSet::new();
    for phase in &document.phases {
        if !phase_names.insert(phase.name.as_str()) {
            issues.push(CatalogIssue::DuplicatePhase(phase.name.clone()));
        }
        for req in &phase.requirements {
            if !document.phases.iter().any(|p| &p.name == req) {
                issues.push(CatalogIssue::DanglingRequirement {
                    phase: phase.name.clone(),
                    missing: req.clone(),
                });
            }
        }
    }

    for element in &document.elements {
        for dep in &element.dependencies {
            if !element_ids.contains(dep) {
                issues.push(CatalogIssue::DanglingDependency {
                    element: element.id.clone(),
                    missing: dep.clone(),
                });
            }
        }

        if element.layer == Layer::Foundational && !element.is_root() {
            issues.push(CatalogIssue::FoundationalWithDependencies(element.id.clone()));
        }

        match document.phase(&element.category) {
            None => issues.push(CatalogIssue::UnknownCategory {
                element: element.id.clone(),
                category: element.category.clone(),
            }),
            Some(phase) if phase.layer != element.layer || phase.hierarchy != element.hierarchy => {
                issues.push(CatalogIssue::PhaseMismatch {
                    element: element.id.clone(),
                    phase: phase.name.clone(),
                });
            }
            Some(_) => {}
        }
    }

    issues.extend(find_cycles(&document.elements).into_iter().map(CatalogIssue::Cycle));

    for issue in &issues {
        if issue.severity() == Severity::Error {
            warn!("Catalog issue: {}", issue);
        }
    }

    CatalogReport {
        issues,
        stats: calculate_stats(document),
    }
}

/// Find dependency cycles using DFS, visiting elements in catalog order.
///
/// Every back edge yields one cycle, so cycles sharing an element are all
/// reported.
fn find_cycles(elements: &[Element]) -> Vec<Vec<ElementId>> {
    let by_id: HashMap<&ElementId, &Element> = elements.iter().map(|e| (&e.id, e)).collect();
    let mut cycles = Vec::new();
    let mut visited: HashSet<&ElementId> = HashSet::new();

    for element in elements {
        if visited.contains(&element.id) {
            continue;
        }
        let mut on_stack = HashSet::new();
        let mut path = Vec::new();
        walk(&element.id, &by_id, &mut visited, &mut on_stack, &mut path, &mut cycles);
    }

    cycles
}

fn walk<'a>(
    node: &'a ElementId,
    by_id: &HashMap<&'a ElementId, &'a Element>,
    visited: &mut HashSet<&'a ElementId>,
    on_stack: &mut HashSet<&'a ElementId>,
    path: &mut Vec<&'a ElementId>,
    cycles: &mut Vec<Vec<ElementId>>,
) {
    visited.insert(node);
    on_stack.insert(node);
    path.push(node);

    if let Some(element) = by_id.get(node).copied() {
        for dep in &element.dependencies {
            if on_stack.contains(dep) {
                if let Some(start) = path.iter().position(|id| *id == dep) {
                    cycles.push(path[start..].iter().map(|id| (*id).clone()).collect());
                }
            } else if !visited.contains(dep) {
                walk(dep, by_id, visited, on_stack, path, cycles);
            }
        }
    }

    path.pop();
    on_stack.remove(node);
}

fn calculate_stats(document: &Document) -> CatalogStats {
    let mut stats = CatalogStats {
        elements: document.elements.len(),
        phases: document.phases.len(),
        roots: document.elements.iter().filter(|e| e.is_root()).count(),
        ..Default::default()
    };
    for element in &document.elements {
        *stats.by_hierarchy.entry(element.hierarchy).or_insert(0) += 1;
    }
    stats
}
