//! Request logging utilities for relayed calls
//!
//! Provides structured logging with correlation IDs for tracing one chat turn
//! from the caller to the upstream and back.

use std::time::Instant;

use axum::http::Method;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::UpstreamError;

/// Context for tracking a relayed call
#[derive(Debug, Clone)]
pub struct RelayContext {
    /// Unique identifier for this call (for log correlation)
    pub trace_id: String,
    /// When the call started
    pub start_time: Instant,
    /// Gateway route that received the call
    pub route: &'static str,
    /// Inbound method
    pub method: Method,
}

impl RelayContext {
    /// Create a new relay context
    pub fn new(route: &'static str, method: Method) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            route,
            method,
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Elapsed time in seconds, for histograms
    pub fn elapsed_secs(&self) -> f64 {
        self.start_time.elapsed().as_secs_f64()
    }

    pub fn log_preflight(&self) {
        debug!(
            trace_id = %self.trace_id,
            route = %self.route,
            "Answered preflight without contacting upstream"
        );
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, transport: &str, url: &str, body_size: Option<usize>) {
        debug!(
            trace_id = %self.trace_id,
            route = %self.route,
            transport = %transport,
            method = %self.method,
            url = %url,
            body_size = ?body_size,
            "Sending request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16, body_len: usize) {
        info!(
            trace_id = %self.trace_id,
            route = %self.route,
            method = %self.method,
            status = %status,
            body_len = %body_len,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log a transport failure that is being replaced by the fallback reply
    pub fn log_unreachable(&self, url: &str, error: &UpstreamError) {
        warn!(
            trace_id = %self.trace_id,
            route = %self.route,
            method = %self.method,
            url = %url,
            kind = error.kind(),
            error = %error,
            elapsed_ms = %self.elapsed_ms(),
            "Upstream unreachable, returning fallback reply"
        );
    }
}
