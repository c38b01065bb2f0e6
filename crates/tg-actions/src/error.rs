//! Error types for action dispatch

use tg_core::TargetError;
use thiserror::Error;

/// Result type for action dispatch
pub type ActionResult<T> = Result<T, ActionError>;

/// Errors raised while validating or executing a step
#[derive(Debug, Error)]
pub enum ActionError {
    /// Malformed step input (missing selector, missing key name)
    #[error("invalid step: {0}")]
    Validation(String),

    /// An assertion action observed a value other than the expected one
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The automation target rejected or failed an operation
    #[error(transparent)]
    Target(#[from] TargetError),
}
