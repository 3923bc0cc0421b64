//! Health endpoint integration tests
//!
//! Tests for the health check endpoints:
//! - GET /health - Service status with upstream configuration
//! - GET /health/ready - Readiness check
//! - GET /health/live - Liveness check

use serde_json::Value;

use crate::common::{gateway_for, unreachable_base_url};

#[tokio::test]
async fn test_health_endpoint_returns_proper_structure() {
    let server = gateway_for("http://chatbot.internal:8080/");

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json: Value = response.json();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json.get("uptime_seconds").is_some(), "Response should have 'uptime_seconds' field");
    assert!(json.get("timestamp").is_some(), "Response should have 'timestamp' field");

    let upstream = &json["upstream"];
    assert_eq!(upstream["base_url"], "http://chatbot.internal:8080");
    assert_eq!(upstream["chat_path"], "/chatbot");
    assert_eq!(upstream["timeout_seconds"], 10);
    assert!(upstream.get("environment").is_none());
}

#[tokio::test]
async fn test_health_does_not_depend_on_upstream() {
    let server = gateway_for(&unreachable_base_url());

    server.get("/health").await.assert_status_ok();
    server.get("/health/ready").await.assert_status_ok();

    let response = server.get("/health/live").await;
    response.assert_status_ok();
    assert_eq!(response.json::<Value>()["status"], "healthy");
}
