//! Unrouted method and path integration tests
//!
//! Requests the gateway does not route still carry the CORS grant and a JSON
//! error body, and never reach the upstream.

use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::common::{assert_relay_headers, gateway_with_upstream};
use crate::mocks::CountingUpstream;

#[tokio::test]
async fn test_unrouted_methods_on_relay_paths_carry_cors() {
    let upstream = Arc::new(CountingUpstream::default());
    let server = gateway_with_upstream(upstream.clone());

    for (method, path) in [
        (Method::GET, "/chatbot"),
        (Method::PUT, "/chatbot"),
        (Method::DELETE, "/chatbot"),
        (Method::PATCH, "/api/quotes"),
    ] {
        let response = server.method(method.clone(), path).await;

        response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
        assert_relay_headers(&response);
        let json: Value = response.json();
        assert_eq!(json["error"]["code"], "METHOD_NOT_ALLOWED", "{method} {path}");
    }

    assert_eq!(upstream.calls(), 0);
}

#[tokio::test]
async fn test_unknown_path_carries_cors() {
    let upstream = Arc::new(CountingUpstream::default());
    let server = gateway_with_upstream(upstream.clone());

    let response = server.post("/nowhere").text("{}").await;

    response.assert_status(StatusCode::NOT_FOUND);
    assert_relay_headers(&response);
    assert_eq!(response.json::<Value>()["error"]["code"], "NOT_FOUND");
    assert_eq!(upstream.calls(), 0);
}
