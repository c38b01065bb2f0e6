//! Action interpreter
//!
//! Maps one [`Step`](tg_core::Step) to a concrete effect against an
//! [`AutomationTarget`](tg_core::AutomationTarget). Dispatch goes through a
//! registry keyed by lowercase action name, so each handler is independently
//! testable and new actions can be registered without touching a central
//! switch.
//!
//! # Built-in actions
//!
//! goto, fill, click, asserttext, assertvisible, wait, type, press, select,
//! hover, screenshot. Unknown action names are logged and skipped; every
//! other failure propagates unchanged to the caller.

mod error;
mod handlers;
mod registry;

pub use error::{ActionError, ActionResult};
pub use handlers::wait_millis;
pub use registry::{ActionHandler, ActionRegistry};
