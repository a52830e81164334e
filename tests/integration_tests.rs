// Integration tests: HTTP and WebSocket endpoints

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use common::{FakeSource, RecordingSink};
use serde_json::json;
use std::sync::Arc;
use sys_health::config::AppConfig;
use sys_health::models::{Sample, Thresholds};
use sys_health::monitor::Monitor;
use sys_health::routes;

const TEST_CONFIG: &str = r#"
[server]
port = 8081
host = "0.0.0.0"

[monitoring]
sample_interval_ms = 1000
stats_log_interval_secs = 60

[thresholds]
mem_threshold_mb = 100
cpu_threshold_percent = 80
disk_io_threshold = 500

[publishing]
status_frequency_ms = 50
"#;

fn test_app() -> (axum::Router, Arc<Monitor>) {
    let config = AppConfig::load_from_str(TEST_CONFIG).unwrap();
    let monitor = Arc::new(Monitor::new(
        Arc::new(FakeSource::new()),
        Arc::new(RecordingSink::default()),
        config.thresholds().unwrap(),
        config.scheduler_config(),
    ));
    (routes::app(monitor.clone(), config), monitor)
}

fn committed_sample() -> Sample {
    Sample {
        timestamp_ms: 5_000,
        total_memory_mb: 8192,
        free_memory_mb: 2048,
        used_memory_mb: 6144,
        cpu_load_percent: 42.0,
        disk_reads_cumulative: 1_000,
        disk_writes_cumulative: 2_000,
        disk_io_delta: 300,
    }
}

#[tokio::test]
async fn test_status_before_first_tick() {
    let (app, _) = test_app();
    let server = TestServer::new(app).unwrap();
    let response = server.get("/status").await;
    response.assert_status_ok();
    let text = response.text();
    assert!(text.contains("Samples collected: 0"));
    assert!(text.contains("Total Memory: 0 MB"));
}

#[tokio::test]
async fn test_root_serves_status_text() {
    let (app, monitor) = test_app();
    monitor.publisher().commit(committed_sample());
    let server = TestServer::new(app).unwrap();
    let response = server.get("/").await;
    response.assert_status_ok();
    assert_eq!(response.text(), monitor.status());
    assert!(response.text().contains("Total Memory: 8192 MB"));
}

#[tokio::test]
async fn test_snapshot_endpoint() {
    let (app, monitor) = test_app();
    monitor.publisher().commit(committed_sample());
    let server = TestServer::new(app).unwrap();
    let response = server.get("/api/snapshot").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["generation"], 1);
    assert_eq!(json["sample"]["usedMemoryMb"], 6144);
    assert_eq!(json["sample"]["diskIoDelta"], 300);
    assert_eq!(json["thresholds"]["cpuThresholdPercent"], 80.0);
}

#[tokio::test]
async fn test_version_endpoint() {
    let (app, _) = test_app();
    let server = TestServer::new(app).unwrap();
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("sys-health")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_update_thresholds_partial() {
    let (app, monitor) = test_app();
    let server = TestServer::new(app).unwrap();
    let response = server
        .put("/api/thresholds")
        .json(&json!({ "memThresholdMb": 4096 }))
        .await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["memThresholdMb"], 4096.0);
    assert_eq!(json["cpuThresholdPercent"], 80.0);

    let expected = Thresholds::new(4096.0, 80.0, 500.0).unwrap();
    assert_eq!(monitor.thresholds(), expected);

    let response = server.get("/api/thresholds").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["memThresholdMb"], 4096.0);
}

#[tokio::test]
async fn test_update_thresholds_rejects_negative() {
    let (app, monitor) = test_app();
    let before = monitor.thresholds();
    let server = TestServer::new(app).unwrap();
    let response = server
        .put("/api/thresholds")
        .json(&json!({ "memThresholdMb": 10, "diskIoThreshold": -5 }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let json: serde_json::Value = response.json();
    assert!(json["error"].as_str().unwrap().contains("disk_io_threshold"));
    assert_eq!(monitor.thresholds(), before);
}

#[tokio::test]
async fn test_update_thresholds_rejects_non_numeric() {
    let (app, monitor) = test_app();
    let before = monitor.thresholds();
    let server = TestServer::new(app).unwrap();
    let response = server
        .put("/api/thresholds")
        .json(&json!({ "cpuThresholdPercent": "very high" }))
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(monitor.thresholds(), before);
}

// --- WebSocket (requires http_transport + ws feature) ---

#[tokio::test]
async fn test_ws_status_streams_snapshot_json() {
    let (app, monitor) = test_app();
    monitor.publisher().commit(committed_sample());
    let server = TestServer::builder().http_transport().build(app).unwrap();
    let mut ws = server
        .get_websocket("/ws/status")
        .await
        .into_websocket()
        .await;

    let deadline = tokio::time::Instant::now() + tokio::time::Duration::from_secs(3);
    let json: serde_json::Value = loop {
        let text = ws.receive_text().await;
        if let Ok(v) = serde_json::from_str(&text) {
            break v;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "timed out waiting for JSON"
        );
    };
    assert_eq!(json["generation"], 1);
    assert_eq!(json["sample"]["totalMemoryMb"], 8192);
}
