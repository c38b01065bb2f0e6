//! Ordering and fail-fast behavior of the case runner

use std::path::Path;
use std::sync::Mutex;

use async_trait::async_trait;
use tg_core::{AutomationTarget, Step, TargetError, TargetResult};
use tg_runner::{CaseRunner, RunnerError};

/// Target that records calls in order and can fail on one selector
#[derive(Default)]
struct RecordingTarget {
    calls: Mutex<Vec<String>>,
    fail_selector: Option<String>,
}

impl RecordingTarget {
    fn failing_on(selector: &str) -> Self {
        Self {
            fail_selector: Some(selector.to_string()),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn touch(&self, selector: &str, call: String) -> TargetResult<()> {
        if self.fail_selector.as_deref() == Some(selector) {
            return Err(TargetError::ElementNotFound(selector.to_string()));
        }
        self.calls.lock().unwrap().push(call);
        Ok(())
    }
}

#[async_trait]
impl AutomationTarget for RecordingTarget {
    fn name(&self) -> &str {
        "recording"
    }

    async fn goto(&self, url: &str) -> TargetResult<()> {
        self.touch(url, format!("goto {url}"))
    }

    async fn fill(&self, selector: &str, value: &str) -> TargetResult<()> {
        self.touch(selector, format!("fill {selector}={value}"))
    }

    async fn click(&self, selector: &str) -> TargetResult<()> {
        self.touch(selector, format!("click {selector}"))
    }

    async fn text_content(&self, selector: &str) -> TargetResult<String> {
        self.touch(selector, format!("text {selector}"))?;
        Ok(String::new())
    }

    async fn is_visible(&self, selector: &str) -> TargetResult<bool> {
        self.touch(selector, format!("visible {selector}"))?;
        Ok(true)
    }

    async fn type_text(&self, selector: &str, text: &str) -> TargetResult<()> {
        self.touch(selector, format!("type {selector}={text}"))
    }

    async fn press_key(&self, key: &str) -> TargetResult<()> {
        self.touch(key, format!("press {key}"))
    }

    async fn press_focused(&self, key: &str) -> TargetResult<()> {
        self.touch(key, format!("press_focused {key}"))
    }

    async fn has_focused_element(&self) -> TargetResult<bool> {
        Ok(false)
    }

    async fn select_option(&self, selector: &str, value: &str) -> TargetResult<()> {
        self.touch(selector, format!("select {selector}={value}"))
    }

    async fn hover(&self, selector: &str) -> TargetResult<()> {
        self.touch(selector, format!("hover {selector}"))
    }

    async fn screenshot(&self, path: &Path) -> TargetResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("screenshot {}", path.display()));
        Ok(())
    }
}

#[tokio::test]
async fn empty_input_is_trivial_success() {
    let target = RecordingTarget::default();
    let report = CaseRunner::default().run(&[], &target).await.unwrap();

    assert!(report.cases.is_empty());
    assert_eq!(report.step_count(), 0);
    assert!(target.calls().is_empty());
}

#[tokio::test]
async fn cases_execute_in_first_appearance_order() {
    let steps = vec![
        Step::new("B", "goto").with_selector("https://b0"),
        Step::new("A", "goto").with_selector("https://a0"),
        Step::new("B", "click").with_selector("#b1"),
        Step::new("C", "goto").with_selector("https://c0"),
        Step::new("A", "click").with_selector("#a1"),
    ];

    let target = RecordingTarget::default();
    let report = CaseRunner::default().run(&steps, &target).await.unwrap();

    let order: Vec<&str> = report.cases.iter().map(|c| c.case_id.as_str()).collect();
    assert_eq!(order, vec!["B", "A", "C"]);

    // Case B's two steps run back to back, in source order, before case A.
    assert_eq!(
        target.calls(),
        vec![
            "goto https://b0",
            "click #b1",
            "goto https://a0",
            "click #a1",
            "goto https://c0",
        ]
    );
}

#[tokio::test]
async fn steps_within_a_case_run_in_source_order() {
    let steps = vec![
        Step::new("TC01", "goto").with_selector("https://x"),
        Step::new("TC01", "fill")
            .with_selector("#f")
            .with_value("v"),
        Step::new("TC01", "click").with_selector("#b"),
    ];

    let target = RecordingTarget::default();
    let report = CaseRunner::default().run(&steps, &target).await.unwrap();

    assert_eq!(
        target.calls(),
        vec!["goto https://x", "fill #f=v", "click #b"]
    );
    assert_eq!(report.cases[0].steps.len(), 3);
    assert_eq!(report.cases[0].steps[1].action, "fill");
}

#[tokio::test]
async fn step_failure_aborts_remaining_cases() {
    let steps = vec![
        Step::new("TC01", "goto").with_selector("https://x"),
        Step::new("TC01", "click").with_selector("#broken"),
        Step::new("TC01", "fill").with_selector("#after"),
        Step::new("TC02", "goto").with_selector("https://never"),
    ];

    let target = RecordingTarget::failing_on("#broken");
    let err = CaseRunner::default().run(&steps, &target).await.unwrap_err();

    let RunnerError::Step { case_id, step, .. } = err;
    assert_eq!(case_id, "TC01");
    assert_eq!(step, 2);

    // Neither the rest of TC01 nor any of TC02 ran.
    assert_eq!(target.calls(), vec!["goto https://x"]);
}

#[tokio::test]
async fn validation_failure_also_aborts_the_run() {
    let steps = vec![
        Step::new("TC01", "click"), // no selector
        Step::new("TC02", "goto").with_selector("https://never"),
    ];

    let target = RecordingTarget::default();
    let err = CaseRunner::default().run(&steps, &target).await.unwrap_err();

    assert!(err.to_string().contains("selector required"));
    assert!(target.calls().is_empty());
}

#[tokio::test]
async fn unknown_action_continues_to_next_step() {
    let steps = vec![
        Step::new("TC01", "goto").with_selector("https://x"),
        Step::new("TC01", "frobnicate").with_selector("#x"),
        Step::new("TC01", "click").with_selector("#b"),
    ];

    let target = RecordingTarget::default();
    let report = CaseRunner::default().run(&steps, &target).await.unwrap();

    assert_eq!(target.calls(), vec!["goto https://x", "click #b"]);
    // The skipped step is still an executed (timed) step in the report.
    assert_eq!(report.cases[0].steps.len(), 3);
}

#[tokio::test]
async fn display_name_uses_first_step_description() {
    let steps = vec![
        Step::new("TC01", "goto")
            .with_selector("https://x")
            .with_description("Login flow"),
        Step::new("TC01", "click").with_selector("#b"),
    ];

    let target = RecordingTarget::default();
    let report = CaseRunner::default().run(&steps, &target).await.unwrap();

    assert_eq!(report.cases[0].display_name, "TC01: Login flow");
}
