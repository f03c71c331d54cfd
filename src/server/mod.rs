//! Snapshot server.
//!
//! A thin axum shim over the [`Aggregator`]: every `GET /api/hwinfo` collects
//! a fresh snapshot, `POST /api/exit` stops the server gracefully.

mod app_state;
mod routes;

pub use app_state::AppState;

use std::sync::Arc;

use axum::Router;
use tokio::sync::Notify;

use crate::core::config::ServerConfig;
use crate::core::system_monitor::Aggregator;
use crate::error::{HwError, Result};

pub fn router(state: AppState) -> Router {
    routes::routes().with_state(state)
}

/// Bind, serve until an exit request or Ctrl-C, then drain open connections.
pub async fn run(config: ServerConfig) -> Result<()> {
    let budget = config.probe_timeout;
    let aggregator = tokio::task::spawn_blocking(move || Aggregator::with_system_probes(budget))
        .await
        .map_err(|e| HwError::server(format!("probe initialization failed: {}", e)))?;

    let state = AppState::new(aggregator);
    let shutdown = Arc::clone(&state.shutdown);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    log::info!(
        "Serving snapshots on http://{} (probe budget {:?})",
        listener.local_addr()?,
        budget
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal(exit: Arc<Notify>) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            log::warn!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        _ = exit.notified() => log::info!("Shutting down on exit request"),
        _ = ctrl_c => log::info!("Shutting down on Ctrl-C"),
    }
}
