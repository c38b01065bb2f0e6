//! Sequential case execution

use std::sync::Arc;
use std::time::Instant;

use tg_actions::{ActionError, ActionRegistry};
use tg_core::{group_cases, AutomationTarget, Step};
use thiserror::Error;
use tracing::{debug, error, info};

use crate::report::{CaseReport, RunReport, StepReport};

/// Errors raised while executing a run
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A step failed; position is 1-based within its case
    #[error("step {step} of case {case_id} failed: {source}")]
    Step {
        case_id: String,
        step: usize,
        #[source]
        source: ActionError,
    },
}

/// Result type for run execution
pub type RunnerResult<T> = Result<T, RunnerError>;

/// Executes cases and their steps in order, fail-fast
pub struct CaseRunner {
    registry: Arc<ActionRegistry>,
}

impl CaseRunner {
    /// Create a runner over an action registry
    pub fn new(registry: Arc<ActionRegistry>) -> Self {
        Self { registry }
    }

    /// Create a runner with the built-in actions
    pub fn with_builtin_actions() -> Self {
        Self::new(Arc::new(ActionRegistry::with_builtin_actions()))
    }

    /// Execute the full step sequence against `target`.
    ///
    /// Cases run in order of first appearance of their id; steps within a
    /// case run in source order, each awaited before the next. An empty
    /// sequence is a trivial success with zero dispatches. The first step
    /// error aborts everything that would have followed it.
    pub async fn run(
        &self,
        steps: &[Step],
        target: &dyn AutomationTarget,
    ) -> RunnerResult<RunReport> {
        let cases = group_cases(steps);
        if cases.is_empty() {
            info!("No test cases to execute");
            return Ok(RunReport::default());
        }

        let mut report = RunReport::default();

        for (case_id, case) in &cases {
            let display_name = case.display_name();
            info!(steps = case.steps.len(), "Executing test case: {display_name}");

            let mut case_report = CaseReport {
                case_id: case_id.clone(),
                display_name,
                steps: Vec::new(),
            };

            for (index, step) in case.steps.iter().enumerate() {
                debug!(
                    "Step {}: {} - {}",
                    index + 1,
                    step.action,
                    step.selector.as_deref().unwrap_or("")
                );

                let started = Instant::now();
                self.registry
                    .dispatch(step, target)
                    .await
                    .map_err(|source| {
                        error!("Error in step {} of case {case_id}: {source}", index + 1);
                        RunnerError::Step {
                            case_id: case_id.clone(),
                            step: index + 1,
                            source,
                        }
                    })?;

                case_report.steps.push(StepReport {
                    action: step.action.clone(),
                    duration: started.elapsed(),
                });
            }

            report.cases.push(case_report);
        }

        Ok(report)
    }
}

impl Default for CaseRunner {
    fn default() -> Self {
        Self::with_builtin_actions()
    }
}
