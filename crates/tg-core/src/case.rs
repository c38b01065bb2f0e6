//! Case grouping rules
//!
//! A case is an ordered, non-empty group of steps sharing a case id. Cases
//! execute in order of first appearance of their id in the source sequence;
//! steps within a case keep their source row order.

use indexmap::IndexMap;

use crate::Step;

/// An ordered group of steps sharing one case id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Case {
    /// The shared case identifier
    pub id: String,

    /// Steps in source row order (never empty)
    pub steps: Vec<Step>,
}

impl Case {
    /// Display name: `"{id}: {description}"` using the first step's
    /// description, or the bare id when absent.
    pub fn display_name(&self) -> String {
        match self.steps.first().and_then(|s| s.description.as_deref()) {
            Some(desc) if !desc.is_empty() => format!("{}: {}", self.id, desc),
            _ => self.id.clone(),
        }
    }
}

/// Distinct case ids in order of first appearance.
///
/// This is a stable unique pass over the sequence, not a sort.
pub fn case_order(steps: &[Step]) -> Vec<String> {
    let mut seen = indexmap::IndexSet::new();
    for step in steps {
        seen.insert(step.case_id.clone());
    }
    seen.into_iter().collect()
}

/// Group a flat step sequence into cases.
///
/// Map iteration order is first-appearance order of the case ids; each
/// case's steps keep their source order.
pub fn group_cases(steps: &[Step]) -> IndexMap<String, Case> {
    let mut cases: IndexMap<String, Case> = IndexMap::new();
    for step in steps {
        cases
            .entry(step.case_id.clone())
            .or_insert_with(|| Case {
                id: step.case_id.clone(),
                steps: Vec::new(),
            })
            .steps
            .push(step.clone());
    }
    cases
}
