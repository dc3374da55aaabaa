//! Sync endpoint routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use quotesync_engine::SyncResult;

use crate::error::Result;
use crate::sync::SyncStatus;
use crate::AppState;

/// Create sync routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/sync", post(sync_now))
        .route("/sync/status", get(sync_status))
}

/// POST /sync - Run one sync cycle now.
async fn sync_now(State(state): State<AppState>) -> Result<Json<SyncResult>> {
    let result = state.sync.sync_once().await?;
    Ok(Json(result))
}

/// GET /sync/status - Outcome of recent cycles.
async fn sync_status(State(state): State<AppState>) -> Json<SyncStatus> {
    Json(state.sync.status().await)
}
