//! Action registry
//!
//! The registry maps a case-insensitive action name to a handler
//! implementing [`ActionHandler`]. Dispatch validates the step, then
//! executes the handler against the automation target.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tg_core::{AutomationTarget, Step};
use tracing::{debug, warn};

use crate::error::{ActionError, ActionResult};
use crate::handlers;

/// A single registered action
///
/// `validate` runs before any target call and checks the step's input
/// contract; the default implementation requires a non-blank selector.
/// Handlers whose action operates without a selector override it.
#[async_trait]
pub trait ActionHandler: Send + Sync {
    /// Check the step's inputs before dispatch
    fn validate(&self, step: &Step) -> ActionResult<()> {
        if step.selector_str().is_none() {
            return Err(ActionError::Validation("selector required".to_string()));
        }
        Ok(())
    }

    /// Perform the step's effect against the target
    async fn execute(&self, step: &Step, target: &dyn AutomationTarget) -> ActionResult<()>;
}

/// Registry of action handlers, keyed by lowercase action name
pub struct ActionRegistry {
    handlers: DashMap<String, Arc<dyn ActionHandler>>,
}

impl ActionRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
        }
    }

    /// Create a registry with all built-in actions registered
    pub fn with_builtin_actions() -> Self {
        let registry = Self::new();
        handlers::register_builtin(&registry);
        registry
    }

    /// Register a handler under an action name (stored lowercased)
    pub fn register(&self, action: impl Into<String>, handler: Arc<dyn ActionHandler>) {
        let action = action.into().trim().to_ascii_lowercase();
        debug!(action = %action, "Registering action handler");
        self.handlers.insert(action, handler);
    }

    /// Whether an action name is registered
    pub fn has_action(&self, action: &str) -> bool {
        self.handlers
            .contains_key(&action.trim().to_ascii_lowercase())
    }

    /// Number of registered actions
    pub fn action_count(&self) -> usize {
        self.handlers.len()
    }

    /// Validate and execute one step.
    ///
    /// Unknown action names are logged and skipped without error; this is
    /// the one deliberate continue-on-anomaly. All validation and target
    /// failures propagate unchanged.
    pub async fn dispatch(
        &self,
        step: &Step,
        target: &dyn AutomationTarget,
    ) -> ActionResult<()> {
        let key = step.action.trim().to_ascii_lowercase();

        let handler = match self.handlers.get(&key) {
            Some(entry) => entry.value().clone(),
            None => {
                warn!(action = %step.action, case_id = %step.case_id, "Unknown action, skipping step");
                return Ok(());
            }
        };

        handler.validate(step)?;
        handler.execute(step, target).await
    }
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::with_builtin_actions()
    }
}
