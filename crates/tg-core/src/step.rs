//! Step type representing one row of test intent

use serde::{Deserialize, Serialize};

/// One row of test intent: an action, its target, and optional value and
/// expectation.
///
/// Steps are produced by an external tabular loader and are immutable once
/// created. The `action` name is matched case-insensitively at dispatch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Identifier of the case this step belongs to (never empty)
    pub case_id: String,

    /// Human-readable description, shown for the first step of a case
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Named operation to perform (e.g. "goto", "click", "fill")
    pub action: String,

    /// Element selector or URL the action operates on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,

    /// Input value for fill/type/select/wait/press actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// Expected value for assertion actions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect: Option<String>,
}

impl Step {
    /// Create a step with just a case id and action
    pub fn new(case_id: impl Into<String>, action: impl Into<String>) -> Self {
        Self {
            case_id: case_id.into(),
            description: None,
            action: action.into(),
            selector: None,
            value: None,
            expect: None,
        }
    }

    /// Set the selector
    pub fn with_selector(mut self, selector: impl Into<String>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    /// Set the value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Set the expectation
    pub fn with_expect(mut self, expect: impl Into<String>) -> Self {
        self.expect = Some(expect.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Selector as a trimmed &str, if present and non-blank
    pub fn selector_str(&self) -> Option<&str> {
        self.selector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Value as a trimmed &str, if present and non-blank
    pub fn value_str(&self) -> Option<&str> {
        self.value
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// Build steps from already-parsed tabular rows.
///
/// Columns, in order: case id, description, action, selector, value, expect.
/// Rows with an empty first cell are skipped; rows whose case id or action is
/// blank after trimming are discarded. Missing trailing cells are treated as
/// empty.
pub fn steps_from_rows<R, C>(rows: R) -> Vec<Step>
where
    R: IntoIterator<Item = Vec<C>>,
    C: AsRef<str>,
{
    rows.into_iter()
        .filter_map(|row| {
            let cell = |i: usize| -> Option<String> {
                row.get(i)
                    .map(|c| c.as_ref().trim().to_string())
                    .filter(|s| !s.is_empty())
            };

            let case_id = cell(0)?;
            let action = cell(2)?;

            Some(Step {
                case_id,
                description: cell(1),
                action,
                selector: cell(3),
                value: cell(4),
                expect: cell(5),
            })
        })
        .collect()
}
