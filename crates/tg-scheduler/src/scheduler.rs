//! Run triggering and subprocess invocation

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use cron::Schedule;
use thiserror::Error;
use tg_store::{LogEntry, LogStore};
use tokio::process::Command;
use tracing::{debug, error, info, warn};

use crate::config::RunConfig;

/// Errors raised while starting the scheduler
#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("invalid cron expression '{expression}': {reason}")]
    InvalidSchedule { expression: String, reason: String },
}

/// Decides when a full test run happens and records its outcome.
///
/// Cheap to clone; clones share the configuration and the log store.
#[derive(Clone)]
pub struct Scheduler {
    config: Arc<RunConfig>,
    store: Arc<LogStore>,
}

impl Scheduler {
    /// Create a scheduler over a resolved configuration and a log store
    pub fn new(config: Arc<RunConfig>, store: Arc<LogStore>) -> Self {
        Self { config, store }
    }

    /// The scheduler's configuration
    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Start trigger handling.
    ///
    /// When the schedule is enabled, spawns the cron loop; otherwise
    /// triggers a single run at startup. Either way the caller goes on to
    /// serve the control API. Fails only on an unparseable cron expression.
    pub fn start(&self) -> Result<(), SchedulerError> {
        if self.config.enabled {
            let schedule = Schedule::from_str(&self.config.schedule).map_err(|err| {
                SchedulerError::InvalidSchedule {
                    expression: self.config.schedule.clone(),
                    reason: err.to_string(),
                }
            })?;

            info!("Scheduling test runs with cron pattern: {}", self.config.schedule);
            let scheduler = self.clone();
            tokio::spawn(async move { scheduler.cron_loop(schedule).await });
        } else {
            info!("Schedule disabled, running tests once at startup");
            self.trigger();
        }

        Ok(())
    }

    /// Fire-and-forget: start a run without waiting for it to finish.
    ///
    /// Triggers are not mutually exclusive; a trigger during an in-flight
    /// run starts a second, concurrent run.
    pub fn trigger(&self) {
        let scheduler = self.clone();
        tokio::spawn(async move { scheduler.run_once().await });
    }

    /// Sleep until each upcoming fire time, then start a run
    async fn cron_loop(self, schedule: Schedule) {
        loop {
            let now = Utc::now();
            let next = match schedule.after(&now).next() {
                Some(next) => next,
                None => {
                    warn!("Cron schedule has no upcoming fire times, stopping");
                    return;
                }
            };

            let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
            debug!("Next scheduled run at {next}");
            tokio::time::sleep(wait).await;

            self.trigger();
        }
    }

    /// Invoke the test-run process once and append its outcome.
    ///
    /// The whole run is bounded by the configured timeout; the captured
    /// output is sanitized by the store at append time.
    pub async fn run_once(&self) {
        info!("Starting test execution");
        let timestamp = Utc::now().to_rfc3339();

        let entry = self.invoke(timestamp).await;

        match &entry.error {
            Some(err) => error!("Test execution failed: {err}"),
            None => info!("Test execution completed successfully"),
        }

        self.store.append(entry).await;
    }

    async fn invoke(&self, timestamp: String) -> LogEntry {
        let mut command = Command::new("sh");
        command.arg("-c").arg(&self.config.test_command);
        command.kill_on_drop(true);

        match tokio::time::timeout(self.config.run_timeout, command.output()).await {
            Ok(Ok(output)) => {
                let success = output.status.success();
                LogEntry {
                    timestamp,
                    success,
                    stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                    stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
                    error: if success {
                        None
                    } else {
                        Some(format!("test command exited with {}", output.status))
                    },
                }
            }
            Ok(Err(err)) => LogEntry {
                timestamp,
                success: false,
                stdout: String::new(),
                stderr: String::new(),
                error: Some(format!("failed to spawn test command: {err}")),
            },
            Err(_) => LogEntry {
                timestamp,
                success: false,
                stdout: String::new(),
                stderr: String::new(),
                error: Some(format!(
                    "test run timed out after {} ms",
                    self.config.run_timeout.as_millis()
                )),
            },
        }
    }
}
