//! Run configuration
//!
//! Resolved once at startup from the environment, immutable thereafter, and
//! passed by `Arc` to every component that needs it. No component reads
//! process state after construction.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

const DEFAULT_SCHEDULE: &str = "0 0 2 * * *";
const DEFAULT_PORT: u16 = 9323;
const DEFAULT_LOG_FILE: &str = "reports/execution-log.json";
const DEFAULT_MAX_LOGS: usize = 100;
const DEFAULT_RUN_TIMEOUT_MS: u64 = 300_000;
const DEFAULT_TEST_COMMAND: &str = "./run-tests.sh";

/// Process-wide, read-only run configuration
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Cron expression for recurring runs (six fields, seconds first)
    pub schedule: String,

    /// Whether the recurring schedule is active; when false, one run is
    /// triggered at process start instead
    pub enabled: bool,

    /// Control API listen port
    pub port: u16,

    /// Path of the durable run-outcome history
    pub log_file: PathBuf,

    /// Maximum retained history entries
    pub max_logs: usize,

    /// Hard upper bound on one full test run
    pub run_timeout: Duration,

    /// Shell command that performs the test run
    pub test_command: String,
}

impl RunConfig {
    /// Resolve configuration from the process environment.
    ///
    /// Variables: `CRON_SCHEDULE`, `SCHEDULE_ENABLED` (the string "true"
    /// enables), `PORT`, `LOG_FILE`, `MAX_LOGS`, `RUN_TIMEOUT_MS`,
    /// `TEST_COMMAND`. Unparseable numeric values fall back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            schedule: lookup("CRON_SCHEDULE").unwrap_or_else(|| DEFAULT_SCHEDULE.to_string()),
            enabled: lookup("SCHEDULE_ENABLED").as_deref() == Some("true"),
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            log_file: lookup("LOG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            max_logs: parse_or(lookup("MAX_LOGS"), DEFAULT_MAX_LOGS),
            run_timeout: Duration::from_millis(parse_or(
                lookup("RUN_TIMEOUT_MS"),
                DEFAULT_RUN_TIMEOUT_MS,
            )),
            test_command: lookup("TEST_COMMAND").unwrap_or_else(|| DEFAULT_TEST_COMMAND.to_string()),
        }
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value
        .as_deref()
        .map(str::trim)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
