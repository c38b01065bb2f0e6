//! Run reports
//!
//! Step timings are informational only; nothing gates execution on them.

use std::time::Duration;

use serde::Serialize;

/// Outcome of one full run over all cases
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Executed cases, in execution order
    pub cases: Vec<CaseReport>,
}

impl RunReport {
    /// Total number of executed steps across all cases
    pub fn step_count(&self) -> usize {
        self.cases.iter().map(|c| c.steps.len()).sum()
    }
}

/// Outcome of one executed case
#[derive(Debug, Clone, Serialize)]
pub struct CaseReport {
    /// The case identifier
    pub case_id: String,

    /// `"{id}: {description}"` or the bare id
    pub display_name: String,

    /// Executed steps, in execution order
    pub steps: Vec<StepReport>,
}

/// Timing record for one executed step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    /// The step's action name as written in the source
    pub action: String,

    /// Wall-clock execution time of the dispatch
    pub duration: Duration,
}
