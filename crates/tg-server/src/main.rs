//! testgrid server
//!
//! Resolves the run configuration, starts trigger handling (startup run or
//! cron schedule), and serves the HTTP control plane until interrupted.

use std::sync::Arc;

use anyhow::Result;
use tg_api::AppState;
use tg_scheduler::{RunConfig, Scheduler};
use tg_store::LogStore;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting testgrid scheduler");

    let config = Arc::new(RunConfig::from_env());
    let store = Arc::new(LogStore::new(&config.log_file, config.max_logs));
    let scheduler = Arc::new(Scheduler::new(config.clone(), store.clone()));

    scheduler.start()?;

    let addr = format!("0.0.0.0:{}", config.port);
    info!("Available endpoints:");
    info!("  POST /run-tests - trigger a test run");
    info!("  GET /status - scheduler status");
    info!("  GET /logs - recent run outcomes");

    let state = AppState {
        scheduler,
        store,
        config,
    };

    tokio::select! {
        result = tg_api::start_server(state, &addr) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutting down..."),
    }

    Ok(())
}
