use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use super::app_state::AppState;
use crate::client::transport::{EXIT_PATH, HWINFO_PATH};
use crate::core::system_monitor::Snapshot;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health_handler))
        .route(HWINFO_PATH, get(hwinfo_handler))
        .route(EXIT_PATH, post(exit_handler))
}

async fn health_handler() -> &'static str {
    "OK"
}

/// Collect a fresh snapshot on the blocking pool.
async fn hwinfo_handler(
    State(state): State<AppState>,
) -> Result<Json<Snapshot>, (StatusCode, String)> {
    let aggregator = state.aggregator();

    tokio::task::spawn_blocking(move || aggregator.collect())
        .await
        .map(Json)
        .map_err(|e| {
            log::error!("Snapshot collection task failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("collection failed: {}", e),
            )
        })
}

async fn exit_handler(State(state): State<AppState>) -> Json<Value> {
    log::info!("Exit requested over HTTP");
    state.shutdown.notify_one();
    Json(json!({ "status": "shutting down" }))
}
