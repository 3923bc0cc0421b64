//! Chat-turn endpoint
//!
//! Forwards a chat turn to the upstream and always answers with the
//! canonical reply, whatever envelope the upstream used.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::{
    error::AppError,
    models::ChatTurnRequest,
    normalize::{self, Envelope},
    proxy::{
        forwarder::relay_response, headers::is_preflight, logging::RelayContext, InboundRequest,
        Relay,
    },
    routes::{
        metrics::{record_normalized, record_relay},
        preflight_response, query_suffix, read_request,
    },
    AppState,
};

const ROUTE: &str = "chatbot";

/// Chat-turn handler for POST and OPTIONS
///
/// This handler:
/// 1. Answers preflight calls before reading the body or contacting the upstream
/// 2. Forwards the body unchanged to the configured chat path
/// 3. Normalizes the upstream body into a `ChatTurnReply`
/// 4. Relays the upstream status, or 502 with the fallback reply
pub async fn chat_turn(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<Response, AppError> {
    let ctx = RelayContext::new(ROUTE, request.method().clone());
    if is_preflight(request.method()) {
        return Ok(preflight_response(ROUTE, &ctx));
    }

    let (method, uri, body) = read_request(request).await?;

    let caller = ChatTurnRequest::from_body(&body);
    let target = format!("{}{}", state.config.upstream_chat_path, query_suffix(&uri));

    let relay = state
        .forwarder
        .relay(InboundRequest { method, target, body }, &ctx)
        .await;
    record_relay(ROUTE, relay.outcome(), ctx.elapsed_secs());

    let upstream = match relay {
        Relay::Upstream(upstream) => upstream,
        other => return Ok(other.into_response()),
    };

    let envelope = Envelope::detect(Some(&upstream.body));
    record_normalized(envelope.label());
    let mut reply = normalize::resolve(envelope);

    // Relay the caller's session when the upstream did not name one.
    if reply.session_id.is_none() && !reply.is_fallback() {
        reply.session_id = caller.session_id;
    }

    info!(
        trace_id = %ctx.trace_id,
        status = %upstream.status,
        messages = reply.messages.len(),
        end_session = reply.end_session,
        duration_ms = %ctx.elapsed_ms(),
        "Chat turn completed"
    );

    Ok(relay_response(reply_status(upstream.status), reply.to_json()))
}

/// Status sent with a canonical reply
///
/// The reply always has a body, so statuses that forbid one become 200.
fn reply_status(status: StatusCode) -> StatusCode {
    match status {
        StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT | StatusCode::NOT_MODIFIED => {
            StatusCode::OK
        }
        status if status.is_informational() => StatusCode::OK,
        status => status,
    }
}
