//! Pass-through proxy handler
//!
//! Forwards `/api/*` requests to the upstream without interpreting either
//! body. Used by callers that talk to backend endpoints other than the chat
//! turn.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::{
    error::AppError,
    proxy::{headers::is_preflight, logging::RelayContext, InboundRequest},
    routes::{metrics::record_relay, preflight_response, query_suffix, read_request},
    AppState,
};

const ROUTE: &str = "api";

/// Pass-through handler for every `/api/*` method the gateway supports
pub async fn passthrough_handler(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let ctx = RelayContext::new(ROUTE, request.method().clone());
    if is_preflight(request.method()) {
        return Ok(preflight_response(ROUTE, &ctx));
    }

    let (method, uri, body) = read_request(request).await?;

    // Strip the /api prefix; the upstream base already points at the backend root.
    let path = uri.path();
    let forward_path = path.strip_prefix("/api").unwrap_or(path);
    let target = format!("{}{}", forward_path, query_suffix(&uri));

    info!(
        trace_id = %ctx.trace_id,
        method = %method,
        path = %path,
        forward_path = %forward_path,
        "Processing pass-through request"
    );

    let relay = state
        .forwarder
        .relay(InboundRequest { method, target, body }, &ctx)
        .await;
    record_relay(ROUTE, relay.outcome(), ctx.elapsed_secs());

    Ok(relay.into_response())
}
