//! Route behavior of the control API

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::Value;
use tempfile::TempDir;
use tg_api::{create_router, AppState};
use tg_scheduler::{RunConfig, Scheduler};
use tg_store::{LogEntry, LogStore};
use tower::ServiceExt;

fn state_for(dir: &TempDir, enabled: bool) -> AppState {
    let config = Arc::new(RunConfig {
        enabled,
        test_command: "echo api-run".to_string(),
        log_file: dir.path().join("execution-log.json"),
        ..RunConfig::default()
    });
    let store = Arc::new(LogStore::new(&config.log_file, config.max_logs));
    let scheduler = Arc::new(Scheduler::new(config.clone(), store.clone()));

    AppState {
        scheduler,
        store,
        config,
    }
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn run_tests_confirms_start_immediately() {
    let dir = TempDir::new().unwrap();
    let state = state_for(&dir, false);
    let app = create_router(state.clone());

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/run-tests")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Tests started");
    assert!(json["timestamp"].is_string());

    // The triggered run completes in the background.
    tokio::time::sleep(Duration::from_secs(2)).await;
    let logs = state.store.read().await;
    assert_eq!(logs.len(), 1);
    assert!(logs[0].stdout.contains("api-run"));
}

#[tokio::test]
async fn status_reports_schedule_when_enabled() {
    let dir = TempDir::new().unwrap();
    let app = create_router(state_for(&dir, true));

    let response = app
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "running");
    assert_eq!(json["schedule"], "0 0 2 * * *");
    assert_eq!(json["port"], 9323);
}

#[tokio::test]
async fn status_reports_disabled_marker() {
    let dir = TempDir::new().unwrap();
    let app = create_router(state_for(&dir, false));

    let response = app
        .oneshot(Request::get("/status").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let json = body_json(response).await;
    assert_eq!(json["schedule"], "disabled");
}

#[tokio::test]
async fn logs_returns_last_ten_entries() {
    let dir = TempDir::new().unwrap();
    let state = state_for(&dir, false);

    for n in 0..12 {
        state
            .store
            .append(LogEntry {
                timestamp: format!("2026-08-07T02:00:{n:02}Z"),
                success: true,
                stdout: format!("run {n}"),
                stderr: String::new(),
                error: None,
            })
            .await;
    }

    let app = create_router(state);
    let response = app
        .oneshot(Request::get("/logs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let logs = json["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 10);
    assert_eq!(logs[0]["stdout"], "run 2");
    assert_eq!(logs[9]["stdout"], "run 11");
}

#[tokio::test]
async fn logs_with_empty_history() {
    let dir = TempDir::new().unwrap();
    let app = create_router(state_for(&dir, false));

    let response = app
        .oneshot(Request::get("/logs").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["logs"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn unknown_route_is_404() {
    let dir = TempDir::new().unwrap();
    let app = create_router(state_for(&dir, false));

    let response = app
        .oneshot(Request::get("/nope").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Not found");
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let dir = TempDir::new().unwrap();
    let app = create_router(state_for(&dir, false));

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/run-tests")
                .header(header::ORIGIN, "https://dashboard.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn responses_carry_cors_headers() {
    let dir = TempDir::new().unwrap();
    let app = create_router(state_for(&dir, false));

    let response = app
        .oneshot(
            Request::get("/status")
                .header(header::ORIGIN, "https://dashboard.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "*"
    );
}
