//! Prometheus metrics endpoint
//!
//! Exposes application metrics in Prometheus format for monitoring.

use axum::response::IntoResponse;
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

/// Global Prometheus handle for metrics export
static PROMETHEUS_HANDLE: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("Failed to install Prometheus recorder")
});

/// Initialize metrics (call once at startup)
pub fn init_metrics() {
    // Force initialization of the lazy static
    let _ = &*PROMETHEUS_HANDLE;

    register_metrics();
}

fn register_metrics() {
    metrics::describe_counter!(
        "chatbridge_relays_total",
        "Total number of relayed calls by outcome"
    );
    metrics::describe_histogram!(
        "chatbridge_relay_duration_seconds",
        "Relay duration in seconds"
    );
    metrics::describe_counter!(
        "chatbridge_normalized_total",
        "Upstream replies normalized, by envelope shape"
    );
}

/// Prometheus metrics endpoint handler
///
/// Returns metrics in Prometheus text format for scraping.
pub async fn prometheus_metrics() -> impl IntoResponse {
    PROMETHEUS_HANDLE.render()
}

/// Record one relayed call
pub fn record_relay(route: &str, outcome: &str, duration_secs: f64) {
    metrics::counter!(
        "chatbridge_relays_total",
        "route" => route.to_string(),
        "outcome" => outcome.to_string()
    )
    .increment(1);
    metrics::histogram!("chatbridge_relay_duration_seconds", "route" => route.to_string())
        .record(duration_secs);
}

/// Record the envelope shape of a normalized reply
pub fn record_normalized(envelope: &str) {
    metrics::counter!("chatbridge_normalized_total", "envelope" => envelope.to_string())
        .increment(1);
}
