//! Log entries and sanitization

use serde::{Deserialize, Serialize};

/// Maximum retained length of captured stdout/stderr, in characters
pub const MAX_CAPTURE_LEN: usize = 1000;

/// One recorded run outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// When the run happened (RFC 3339, UTC)
    pub timestamp: String,

    /// Whether the run exited successfully
    pub success: bool,

    /// Captured standard output (sanitized, truncated)
    pub stdout: String,

    /// Captured standard error (sanitized, truncated)
    pub stderr: String,

    /// Failure description, if the run failed (sanitized)
    pub error: Option<String>,
}

/// Sanitize an entry for persistence.
///
/// Carriage returns, newlines and tabs become single spaces in
/// stdout/stderr and are removed outright from `error`; stdout/stderr are
/// truncated to [`MAX_CAPTURE_LEN`] characters. Applied exactly once, at
/// append time.
pub fn sanitize_entry(entry: LogEntry) -> LogEntry {
    LogEntry {
        timestamp: entry.timestamp,
        success: entry.success,
        stdout: flatten(&entry.stdout),
        stderr: flatten(&entry.stderr),
        error: entry.error.as_deref().map(strip_control),
    }
}

fn flatten(text: &str) -> String {
    text.chars()
        .map(|c| if matches!(c, '\r' | '\n' | '\t') { ' ' } else { c })
        .take(MAX_CAPTURE_LEN)
        .collect()
}

fn strip_control(text: &str) -> String {
    text.chars()
        .filter(|c| !matches!(c, '\r' | '\n' | '\t'))
        .collect()
}
