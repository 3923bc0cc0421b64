//! HTTP routes for Chatbridge
//!
//! This module defines all HTTP endpoints exposed by the gateway.

pub mod chat;
pub mod health;
pub mod metrics;
pub mod passthrough;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request,
    http::{Method, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use bytes::Bytes;
use http_body_util::{BodyExt, Limited};
use tower_http::{compression::CompressionLayer, trace::TraceLayer};

use crate::{
    error::{AppError, AppResult},
    proxy::{logging::RelayContext, Relay},
    routes::metrics::record_relay,
    AppState,
};

/// Largest inbound body the gateway will buffer
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS is answered by the Forwarder itself so that preflight and
    // fallback responses never depend on the upstream.
    let relay_routes = Router::new()
        .route("/chatbot", post(chat::chat_turn).options(chat::chat_turn))
        .route(
            "/api/*path",
            get(passthrough::passthrough_handler)
                .post(passthrough::passthrough_handler)
                .put(passthrough::passthrough_handler)
                .delete(passthrough::passthrough_handler)
                .options(passthrough::passthrough_handler),
        );

    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .route("/metrics", get(metrics::prometheus_metrics));

    // Unrouted methods and paths still answer with the CORS grant and a JSON body.
    Router::new()
        .merge(public_routes)
        .merge(relay_routes)
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn method_not_allowed(method: Method, uri: Uri) -> AppError {
    AppError::MethodNotAllowed(format!("{method} is not supported on {}", uri.path()))
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

/// Answer a preflight call before its body is read
pub(crate) fn preflight_response(route: &'static str, ctx: &RelayContext) -> Response {
    ctx.log_preflight();
    let relay = Relay::Preflight;
    record_relay(route, relay.outcome(), ctx.elapsed_secs());
    relay.into_response()
}

/// Split an inbound request into method, URI and buffered body
pub(crate) async fn read_request(request: Request) -> AppResult<(Method, Uri, Bytes)> {
    let (parts, body) = request.into_parts();
    let body = read_body(body).await?;
    Ok((parts.method, parts.uri, body))
}

async fn read_body(body: Body) -> AppResult<Bytes> {
    Limited::new(body, MAX_BODY_BYTES)
        .collect()
        .await
        .map(|collected| collected.to_bytes())
        .map_err(|e| AppError::BadRequest(format!("Failed to read request body: {e}")))
}

/// Query string of a URI including its leading `?`, or empty
pub(crate) fn query_suffix(uri: &Uri) -> String {
    uri.query().map(|q| format!("?{q}")).unwrap_or_default()
}
