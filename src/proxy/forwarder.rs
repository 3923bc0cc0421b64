//! Forwarder
//!
//! Relays one inbound call to the configured upstream. Preflight calls are
//! answered locally, transport failures become a fallback reply, and every
//! response carries the cross-origin grant.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::error::UpstreamError;
use crate::models::ChatTurnReply;
use crate::proxy::headers::{is_preflight, is_read_only, relay_response_headers};
use crate::proxy::logging::RelayContext;
use crate::proxy::upstream::{Upstream, UpstreamRequest, UpstreamResponse};

/// Status returned when the upstream could not be reached
pub const UNREACHABLE_STATUS: StatusCode = StatusCode::BAD_GATEWAY;

/// Inbound call as seen by the Forwarder
#[derive(Debug, Clone)]
pub struct InboundRequest {
    pub method: Method,
    /// Path and query appended to the upstream base, e.g. `/chatbot?lang=en`
    pub target: String,
    pub body: Bytes,
}

/// Result of relaying one call
#[derive(Debug)]
pub enum Relay {
    /// Preflight answered without contacting the upstream
    Preflight,
    /// Upstream answered, with any status
    Upstream(UpstreamResponse),
    /// The outbound call failed
    Unreachable(UpstreamError),
}

impl Relay {
    /// Label used in logs and metrics
    pub fn outcome(&self) -> &'static str {
        match self {
            Relay::Preflight => "preflight",
            Relay::Upstream(_) => "upstream",
            Relay::Unreachable(_) => "unreachable",
        }
    }
}

/// Build a response with the relay header set
pub fn relay_response(status: StatusCode, body: impl Into<Body>) -> Response {
    (status, relay_response_headers(), body.into()).into_response()
}

impl IntoResponse for Relay {
    /// Raw relay: the upstream body is passed through unchanged
    fn into_response(self) -> Response {
        match self {
            Relay::Preflight => relay_response(StatusCode::NO_CONTENT, Body::empty()),
            Relay::Upstream(upstream) => relay_response(upstream.status, upstream.body),
            Relay::Unreachable(_) => {
                relay_response(UNREACHABLE_STATUS, ChatTurnReply::fallback().to_json())
            }
        }
    }
}

/// Relays calls to one upstream base address
pub struct Forwarder {
    upstream: Arc<dyn Upstream>,
    base_url: String,
}

impl Forwarder {
    pub fn new(upstream: Arc<dyn Upstream>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            upstream,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Upstream URL for a caller's path and query suffix
    pub fn upstream_url(&self, target: &str) -> String {
        if target.is_empty() || target.starts_with('/') || target.starts_with('?') {
            format!("{}{}", self.base_url, target)
        } else {
            format!("{}/{}", self.base_url, target)
        }
    }

    /// Relay one inbound call
    ///
    /// Dropping the returned future cancels the in-flight outbound call.
    pub async fn relay(&self, request: InboundRequest, ctx: &RelayContext) -> Relay {
        if is_preflight(&request.method) {
            ctx.log_preflight();
            return Relay::Preflight;
        }

        let url = self.upstream_url(&request.target);
        let body = if is_read_only(&request.method) {
            None
        } else {
            Some(request.body)
        };

        ctx.log_upstream_request(self.upstream.name(), &url, body.as_ref().map(Bytes::len));

        let outbound = UpstreamRequest {
            method: request.method,
            url: url.clone(),
            body,
        };

        match self.upstream.send(outbound).await {
            Ok(response) => {
                ctx.log_upstream_response(response.status.as_u16(), response.body.len());
                Relay::Upstream(response)
            }
            Err(err) => {
                ctx.log_unreachable(&url, &err);
                Relay::Unreachable(err)
            }
        }
    }
}
