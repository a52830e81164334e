// GET/PUT handlers: status text, snapshot, thresholds, version

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::IntoResponse,
};

use super::{ApiError, AppState};
use crate::models::{ThresholdUpdate, Thresholds};

/// Package version (from Cargo.toml).
const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Package name (from Cargo.toml).
const NAME: &str = env!("CARGO_PKG_NAME");

/// GET / and GET /status: the rendered status report as plain text.
pub(super) async fn status_handler(State(state): State<AppState>) -> String {
    state.monitor.status()
}

/// GET /api/snapshot: the current snapshot as JSON.
pub(super) async fn snapshot_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.monitor.snapshot())
}

/// GET /api/thresholds
pub(super) async fn thresholds_handler(State(state): State<AppState>) -> Json<Thresholds> {
    Json(state.monitor.thresholds())
}

/// PUT /api/thresholds: partial update; a rejected body leaves every threshold unchanged.
pub(super) async fn update_thresholds_handler(
    State(state): State<AppState>,
    payload: Result<Json<ThresholdUpdate>, JsonRejection>,
) -> Result<Json<Thresholds>, ApiError> {
    let Json(update) = payload.map_err(|e| ApiError::InvalidRequest(e.body_text()))?;
    let thresholds = state
        .monitor
        .update_thresholds(&update)
        .map_err(|e| ApiError::InvalidRequest(e.to_string()))?;
    Ok(Json(thresholds))
}

/// GET /version: service name and version.
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}
