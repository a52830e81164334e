// HTTP + WebSocket routes

mod error;
mod http;
mod ws;

use axum::{Router, routing::get};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::monitor::Monitor;

pub use error::ApiError;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) monitor: Arc<Monitor>,
    pub(crate) config: AppConfig,
}

pub fn app(monitor: Arc<Monitor>, config: AppConfig) -> Router {
    let state = AppState { monitor, config };
    Router::new()
        .route("/", get(http::status_handler)) // GET /
        .route("/status", get(http::status_handler)) // GET /status
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/snapshot", get(http::snapshot_handler)) // GET /api/snapshot
        .route(
            "/api/thresholds",
            get(http::thresholds_handler).put(http::update_thresholds_handler),
        ) // GET, PUT /api/thresholds
        .route("/ws/status", get(ws::ws_status)) // WS /ws/status
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}
