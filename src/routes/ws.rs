// WebSocket status stream

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use bytes::Bytes;
use std::sync::Arc;
use tokio::time::{Duration, Instant, MissedTickBehavior, timeout};

use super::AppState;
use crate::monitor::Monitor;

pub(super) const WS_PING_INTERVAL: Duration = Duration::from_secs(30);
pub(super) const WS_SEND_TIMEOUT: Duration = Duration::from_secs(10);

pub(super) async fn ws_status(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let monitor = state.monitor.clone();
    let interval_ms = state.config.publishing.status_frequency_ms;
    ws.on_upgrade(move |socket| async move {
        if let Err(e) = stream_status(socket, monitor, interval_ms).await {
            tracing::info!("Status stream error: {}", e);
        }
    })
}

/// Pushes the snapshot JSON on every interval; readers never hold anything the tick waits on.
async fn stream_status(
    mut socket: WebSocket,
    monitor: Arc<Monitor>,
    interval_ms: u64,
) -> anyhow::Result<()> {
    tracing::info!("Client connected to status stream");
    let mut tick = tokio::time::interval(Duration::from_millis(interval_ms));
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut ping_interval =
        tokio::time::interval_at(Instant::now() + WS_PING_INTERVAL, WS_PING_INTERVAL);
    ping_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        tokio::select! {
            _ = tick.tick() => {
                let json = serde_json::to_string(&monitor.snapshot())?;
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Text(json.into()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
            _ = ping_interval.tick() => {
                let r = timeout(WS_SEND_TIMEOUT, socket.send(Message::Ping(Bytes::new()))).await;
                if r.is_err() || r.unwrap_or(Ok(())).is_err() {
                    break;
                }
            }
        }
    }
    tracing::info!("Client disconnected from status stream");
    Ok(())
}
