//! Scheduler
//!
//! Owns the process-wide run configuration, decides when a full test run
//! happens (process start, cron fire, or manual trigger), invokes the
//! external test-run process, and records each outcome in the log store.
//!
//! No lock guards run invocation: a manual trigger arriving while a
//! scheduled run is executing starts a second, concurrent run. Log entries
//! are informational, so the resulting last-writer-wins race on the history
//! file is accepted.

mod config;
mod scheduler;

pub use config::RunConfig;
pub use scheduler::{Scheduler, SchedulerError};
