//! Core types for testgrid
//!
//! This crate provides the fundamental types used throughout the testgrid
//! implementation: Step, case grouping, and the AutomationTarget capability
//! trait the action interpreter drives.

mod case;
mod step;
mod target;

pub use case::{case_order, group_cases, Case};
pub use step::{steps_from_rows, Step};
pub use target::{AutomationTarget, TargetError, TargetResult};

/// Navigation timeout the automation target is expected to enforce (ms)
pub const NAVIGATION_TIMEOUT_MS: u64 = 60_000;

/// Element-operation timeout the automation target is expected to enforce (ms)
pub const ACTION_TIMEOUT_MS: u64 = 30_000;
