//! Pass-through endpoint integration tests
//!
//! Tests for /api/*: the upstream body is relayed unchanged.

use axum::http::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{assert_relay_headers, gateway_for, unreachable_base_url, FALLBACK};

#[tokio::test]
async fn test_get_is_forwarded_without_body() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quotes/Q-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"quoteId": "Q-1"})))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = gateway_for(&upstream.uri());

    let response = server.get("/api/quotes/Q-1").await;

    response.assert_status_ok();
    assert_relay_headers(&response);
    assert_eq!(response.json::<Value>(), json!({"quoteId": "Q-1"}));

    let received = upstream.received_requests().await.unwrap();
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn test_post_body_and_status_are_relayed_unchanged() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/quote/motor/from-chat"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_string(r#"{"ok":false,"error":"Email is required"}"#),
        )
        .mount(&upstream)
        .await;
    let server = gateway_for(&upstream.uri());

    let sent = json!({"slots": {"customer_name": "Ali"}});
    let response = server
        .post("/api/quote/motor/from-chat")
        .add_query_param("dryRun", "true")
        .json(&sent)
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_relay_headers(&response);
    assert_eq!(response.text(), r#"{"ok":false,"error":"Email is required"}"#);

    let received = upstream.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("dryRun=true"));
    assert_eq!(serde_json::from_slice::<Value>(&received[0].body).unwrap(), sent);
    assert_eq!(
        received[0].headers.get("content-type").unwrap(),
        "application/json"
    );
}

#[tokio::test]
async fn test_non_json_body_is_not_rewritten() {
    let upstream = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_string("plain text"))
        .mount(&upstream)
        .await;
    let server = gateway_for(&upstream.uri());

    let response = server.put("/api/users/1").json(&json!({"name": "x"})).await;

    response.assert_status_ok();
    assert_eq!(response.text(), "plain text");
}

#[tokio::test]
async fn test_delete_is_forwarded() {
    let upstream = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/sessions/s1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&upstream)
        .await;
    let server = gateway_for(&upstream.uri());

    let response = server.delete("/api/sessions/s1").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert_relay_headers(&response);
}

#[tokio::test]
async fn test_unreachable_upstream_yields_fallback() {
    let server = gateway_for(&unreachable_base_url());

    let response = server.get("/api/products").await;

    response.assert_status(StatusCode::BAD_GATEWAY);
    assert_relay_headers(&response);
    assert_eq!(
        response.json::<Value>(),
        json!({"messages": [FALLBACK], "endSession": false})
    );
}
