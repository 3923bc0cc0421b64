//! Health check endpoints
//!
//! Provides endpoints for monitoring and container orchestration:
//! - `/health` - Service status with the configured upstream
//! - `/health/ready` - Readiness check
//! - `/health/live` - Liveness check
//!
//! None of them contact the upstream; its availability is reported per call
//! through the fallback reply instead.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::AppState;

/// Health status enum
///
/// The gateway has no dependency whose loss makes it unhealthy: an
/// unreachable upstream is reported per call through the fallback reply.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
}

/// Upstream the gateway relays to
#[derive(Debug, Serialize)]
pub struct UpstreamInfo {
    pub base_url: String,
    pub chat_path: String,
    pub timeout_seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
}

/// Full health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub timestamp: String,
    pub upstream: UpstreamInfo,
}

/// Simple health response for liveness/readiness
#[derive(Debug, Serialize)]
pub struct SimpleHealthResponse {
    pub status: HealthStatus,
}

/// Full health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    let config = &state.config;

    let response = HealthResponse {
        status: HealthStatus::Healthy,
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        upstream: UpstreamInfo {
            base_url: state.forwarder.base_url().to_string(),
            chat_path: config.upstream_chat_path.clone(),
            timeout_seconds: config.upstream_timeout.as_secs(),
            environment: config.environment.clone(),
        },
    };

    (StatusCode::OK, Json(response))
}

/// Readiness check endpoint
///
/// The gateway holds no connections that must be warmed up, so it is ready
/// as soon as it is serving.
pub async fn readiness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}

/// Liveness check endpoint
pub async fn liveness_check() -> (StatusCode, Json<SimpleHealthResponse>) {
    (
        StatusCode::OK,
        Json(SimpleHealthResponse {
            status: HealthStatus::Healthy,
        }),
    )
}
