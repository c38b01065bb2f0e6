//! The automation-target capability trait
//!
//! The interpreter never talks to a browser engine directly. It drives an
//! [`AutomationTarget`], a narrow interface over whatever performs the
//! literal UI interactions (a CDP client, a WebDriver session, a test mock).
//!
//! Operation-level timeouts are the target's own responsibility: navigation
//! is expected to bound itself at [`crate::NAVIGATION_TIMEOUT_MS`] and wait
//! for DOM-ready rather than full load, element operations at
//! [`crate::ACTION_TIMEOUT_MS`]. The orchestrator never imposes timeouts.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

/// Errors an automation target can report
#[derive(Debug, Clone, Error)]
pub enum TargetError {
    #[error("element not found: {0}")]
    ElementNotFound(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("operation timed out: {0}")]
    Timeout(String),

    #[error("screenshot failed: {0}")]
    Screenshot(String),

    #[error("{0}")]
    Other(String),
}

/// Result type for target operations
pub type TargetResult<T> = Result<T, TargetError>;

/// Capability interface over the external UI-automation engine
#[async_trait]
pub trait AutomationTarget: Send + Sync {
    /// Short name of the target (e.g. "chromium"), used in screenshot paths
    fn name(&self) -> &str;

    /// Navigate to a URL, waiting for DOM-ready
    async fn goto(&self, url: &str) -> TargetResult<()>;

    /// Set the value of the field at `selector`
    async fn fill(&self, selector: &str, value: &str) -> TargetResult<()>;

    /// Click the element at `selector`
    async fn click(&self, selector: &str) -> TargetResult<()>;

    /// Text content of the element at `selector`
    async fn text_content(&self, selector: &str) -> TargetResult<String>;

    /// Whether the element at `selector` is visible
    async fn is_visible(&self, selector: &str) -> TargetResult<bool>;

    /// Type `text` into the element at `selector`, character by character
    async fn type_text(&self, selector: &str, text: &str) -> TargetResult<()>;

    /// Press a keyboard key globally
    async fn press_key(&self, key: &str) -> TargetResult<()>;

    /// Press a keyboard key on the currently focused element
    async fn press_focused(&self, key: &str) -> TargetResult<()>;

    /// Whether any element currently has focus
    async fn has_focused_element(&self) -> TargetResult<bool>;

    /// Choose the option with `value` in the select element at `selector`
    async fn select_option(&self, selector: &str, value: &str) -> TargetResult<()>;

    /// Hover the pointer over the element at `selector`
    async fn hover(&self, selector: &str) -> TargetResult<()>;

    /// Capture a screenshot of the current page to `path`
    async fn screenshot(&self, path: &Path) -> TargetResult<()>;
}
