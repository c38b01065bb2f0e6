//! Control API
//!
//! Minimal HTTP surface over the scheduler and log store, CORS-open to all
//! origins:
//!
//! - `POST /run-tests` - fire-and-forget manual trigger
//! - `GET /status` - scheduler status and configuration summary
//! - `GET /logs` - the ten most recent run outcomes
//!
//! Anything else is a 404; a failing handler is reported as a generic 500
//! with no detail leaked to the caller.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::Serialize;
use tg_scheduler::{RunConfig, Scheduler};
use tg_store::{LogEntry, LogStore};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info};

/// Entries returned by the logs endpoint
const RECENT_LOGS: usize = 10;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub scheduler: Arc<Scheduler>,
    pub store: Arc<LogStore>,
    pub config: Arc<RunConfig>,
}

/// Response to a manual trigger
#[derive(Serialize)]
struct RunTestsResponse {
    message: &'static str,
    timestamp: String,
}

/// Scheduler status summary
#[derive(Serialize)]
struct StatusResponse {
    status: &'static str,
    schedule: String,
    timestamp: String,
    port: u16,
}

/// Recent run outcomes
#[derive(Serialize)]
struct LogsResponse {
    logs: Vec<LogEntry>,
}

/// Error body for 404 and 500 responses
#[derive(Serialize)]
struct ErrorResponse {
    error: &'static str,
}

/// A failed request handler.
///
/// The detail is logged server-side; the caller only ever sees a generic
/// 500 body.
pub struct ApiError(anyhow::Error);

impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request handler failed: {:#}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: "Internal server error",
            }),
        )
            .into_response()
    }
}

/// Create the control API router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/run-tests", post(run_tests))
        .route("/status", get(status))
        .route("/logs", get(logs))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve the control API
pub async fn start_server(state: AppState, addr: &str) -> std::io::Result<()> {
    let router = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Control API listening on {addr}");
    axum::serve(listener, router).await
}

/// POST /run-tests - start a run without waiting for it
async fn run_tests(State(state): State<AppState>) -> Result<Json<RunTestsResponse>, ApiError> {
    state.scheduler.trigger();

    Ok(Json(RunTestsResponse {
        message: "Tests started",
        timestamp: Utc::now().to_rfc3339(),
    }))
}

/// GET /status - scheduler status summary
async fn status(State(state): State<AppState>) -> Result<Json<StatusResponse>, ApiError> {
    let schedule = if state.config.enabled {
        state.config.schedule.clone()
    } else {
        "disabled".to_string()
    };

    Ok(Json(StatusResponse {
        status: "running",
        schedule,
        timestamp: Utc::now().to_rfc3339(),
        port: state.config.port,
    }))
}

/// GET /logs - the most recent run outcomes
async fn logs(State(state): State<AppState>) -> Result<Json<LogsResponse>, ApiError> {
    Ok(Json(LogsResponse {
        logs: state.store.recent(RECENT_LOGS).await,
    }))
}

/// Fallback for unknown routes
async fn not_found() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse { error: "Not found" }),
    )
}
