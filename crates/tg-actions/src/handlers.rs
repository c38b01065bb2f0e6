//! Built-in action handlers
//!
//! One unit struct per action. Selector-taking handlers rely on the default
//! `validate` (selector required); `screenshot`, `wait` and `press` override
//! it with their own contracts.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Local;
use tg_core::{AutomationTarget, Step};
use tracing::debug;

use crate::error::{ActionError, ActionResult};
use crate::registry::{ActionHandler, ActionRegistry};

/// Fallback pause when a wait value does not parse (ms)
const DEFAULT_WAIT_MS: u64 = 1000;

/// Register every built-in action on `registry`
pub(crate) fn register_builtin(registry: &ActionRegistry) {
    registry.register("goto", Arc::new(Goto));
    registry.register("fill", Arc::new(Fill));
    registry.register("click", Arc::new(Click));
    registry.register("asserttext", Arc::new(AssertText));
    registry.register("assertvisible", Arc::new(AssertVisible));
    registry.register("wait", Arc::new(Wait));
    registry.register("type", Arc::new(Type));
    registry.register("press", Arc::new(Press));
    registry.register("select", Arc::new(Select));
    registry.register("hover", Arc::new(Hover));
    registry.register("screenshot", Arc::new(Screenshot));
}

/// Selector lookup, re-checked so handlers can also be called without the
/// registry's validate pass.
fn required_selector(step: &Step) -> ActionResult<&str> {
    step.selector_str()
        .ok_or_else(|| ActionError::Validation("selector required".to_string()))
}

/// Wait duration for a `wait` step: `value` parsed as integer milliseconds,
/// falling back to 1000 on empty or non-numeric input. Never a validation
/// failure.
pub fn wait_millis(step: &Step) -> u64 {
    step.value
        .as_deref()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_WAIT_MS)
}

/// Navigate to the URL held in `selector`
struct Goto;

#[async_trait]
impl ActionHandler for Goto {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let url = required_selector(step)?;
        target.goto(url).await?;
        Ok(())
    }
}

/// Set the value of the field at `selector` to `value` (default empty)
struct Fill;

#[async_trait]
impl ActionHandler for Fill {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;
        target
            .fill(selector, step.value.as_deref().unwrap_or(""))
            .await?;
        Ok(())
    }
}

/// Click the element at `selector`
struct Click;

#[async_trait]
impl ActionHandler for Click {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;
        target.click(selector).await?;
        Ok(())
    }
}

/// Assert the element at `selector` has text exactly equal to `expect`
struct AssertText;

#[async_trait]
impl ActionHandler for AssertText {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;
        let expected = step.expect.as_deref().unwrap_or("");
        let actual = target.text_content(selector).await?;

        if actual != expected {
            return Err(ActionError::Assertion(format!(
                "text of {selector}: expected {expected:?}, got {actual:?}"
            )));
        }
        Ok(())
    }
}

/// Assert the element at `selector` is visible
struct AssertVisible;

#[async_trait]
impl ActionHandler for AssertVisible {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;

        if !target.is_visible(selector).await? {
            return Err(ActionError::Assertion(format!(
                "element {selector} is not visible"
            )));
        }
        Ok(())
    }
}

/// Pause for `value` milliseconds; bad input falls back to 1000 ms
struct Wait;

#[async_trait]
impl ActionHandler for Wait {
    fn validate(&self, _step: &Step) -> ActionResult<()> {
        Ok(())
    }

    async fn execute(&self, step: &Step, _target: &dyn AutomationTarget) -> ActionResult<()> {
        let millis = wait_millis(step);
        debug!(millis, "Waiting");
        tokio::time::sleep(Duration::from_millis(millis)).await;
        Ok(())
    }
}

/// Type `value` into the element at `selector`, character by character
struct Type;

#[async_trait]
impl ActionHandler for Type {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;
        target
            .type_text(selector, step.value.as_deref().unwrap_or(""))
            .await?;
        Ok(())
    }
}

/// Press the keyboard key named by `value`, falling back to `selector`.
///
/// When an element has focus and the key normalizes to "enter", the press is
/// dispatched to the focused element; otherwise it is a global key press.
struct Press;

#[async_trait]
impl ActionHandler for Press {
    fn validate(&self, step: &Step) -> ActionResult<()> {
        if step.value_str().is_none() && step.selector_str().is_none() {
            return Err(ActionError::Validation("key required".to_string()));
        }
        Ok(())
    }

    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let key = step
            .value_str()
            .or_else(|| step.selector_str())
            .ok_or_else(|| ActionError::Validation("key required".to_string()))?;

        if key.eq_ignore_ascii_case("enter") && target.has_focused_element().await? {
            target.press_focused(key).await?;
        } else {
            target.press_key(key).await?;
        }
        Ok(())
    }
}

/// Choose option `value` (default empty) in the select element at `selector`
struct Select;

#[async_trait]
impl ActionHandler for Select {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;
        target
            .select_option(selector, step.value.as_deref().unwrap_or(""))
            .await?;
        Ok(())
    }
}

/// Hover the pointer over the element at `selector`
struct Hover;

#[async_trait]
impl ActionHandler for Hover {
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let selector = required_selector(step)?;
        target.hover(selector).await?;
        Ok(())
    }
}

/// Capture a screenshot to `reports/screenshot-{case}-{target}-{ts}.png`
struct Screenshot;

#[async_trait]
impl ActionHandler for Screenshot {
    fn validate(&self, _step: &Step) -> ActionResult<()> {
        Ok(())
    }

    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S_%3f");
        let path = PathBuf::from(format!(
            "reports/screenshot-{}-{}-{}.png",
            step.case_id,
            target.name(),
            timestamp
        ));

        debug!(path = %path.display(), "Capturing screenshot");
        target.screenshot(&path).await?;
        Ok(())
    }
}
