//! Durable history file

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::{debug, warn};

use crate::entry::{sanitize_entry, LogEntry};

#[derive(Debug, Error)]
enum PersistError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Bounded history of run outcomes backed by a single JSON file
#[derive(Debug, Clone)]
pub struct LogStore {
    path: PathBuf,
    max_logs: usize,
}

impl LogStore {
    /// Create a store over `path`, capped at `max_logs` entries
    pub fn new(path: impl AsRef<Path>, max_logs: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            max_logs,
        }
    }

    /// The history file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full history.
    ///
    /// A missing, unreadable or corrupt file reads as an empty history;
    /// this never fails.
    pub async fn read(&self) -> Vec<LogEntry> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => {
                debug!(path = %self.path.display(), "No readable log history");
                return Vec::new();
            }
        };

        match serde_json::from_str(&content) {
            Ok(logs) => logs,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Corrupt log history, treating as empty");
                Vec::new()
            }
        }
    }

    /// The most recent `n` entries, oldest first
    pub async fn recent(&self, n: usize) -> Vec<LogEntry> {
        let logs = self.read().await;
        let skip = logs.len().saturating_sub(n);
        logs.into_iter().skip(skip).collect()
    }

    /// Sanitize and append one entry, evicting from the front once the
    /// history exceeds the cap, then rewrite the full history.
    pub async fn append(&self, entry: LogEntry) {
        let mut logs = self.read().await;
        logs.push(sanitize_entry(entry));

        if logs.len() > self.max_logs {
            let excess = logs.len() - self.max_logs;
            logs.drain(..excess);
        }

        self.persist(&logs).await;
    }

    /// Write the history, falling back to an empty history on failure.
    /// Failures are logged, never propagated.
    async fn persist(&self, logs: &[LogEntry]) {
        if let Err(err) = self.try_persist(logs).await {
            warn!(path = %self.path.display(), error = %err, "Failed to write log history, writing empty history");

            if let Err(err) = fs::write(&self.path, "[]").await {
                warn!(path = %self.path.display(), error = %err, "Failed to write fallback log history");
            }
        }
    }

    async fn try_persist(&self, logs: &[LogEntry]) -> Result<(), PersistError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string_pretty(logs)?;

        // The serialized form must parse back before it may replace the file.
        let _: Vec<LogEntry> = serde_json::from_str(&json)?;

        fs::write(&self.path, json).await?;
        debug!(path = %self.path.display(), entries = logs.len(), "Wrote log history");
        Ok(())
    }
}
