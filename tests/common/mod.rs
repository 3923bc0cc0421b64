//! Common test utilities for Chatbridge
//!
//! Shared fixtures for building a gateway around a mock upstream.

#![allow(dead_code)]

use std::net::TcpListener;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum_test::{TestServer, TestServerConfig};
use chatbridge::{routes, AppState, Config, Upstream};

/// Fallback line returned when the upstream cannot be used
pub const FALLBACK: &str = "⚠ Backend not reachable";

/// Gateway relaying to the given upstream base URL over HTTP
pub fn gateway_for(base_url: &str) -> TestServer {
    gateway_with_config(Config::for_upstream(base_url))
}

/// Gateway with a fully specified configuration
pub fn gateway_with_config(config: Config) -> TestServer {
    let state = Arc::new(AppState::new(config).expect("Failed to build app state"));
    TestServer::new(routes::create_router(state)).expect("Failed to create test server")
}

/// Gateway served over a real socket, so hyper's own response rules apply
pub fn gateway_over_http(base_url: &str) -> TestServer {
    let state = Arc::new(
        AppState::new(Config::for_upstream(base_url)).expect("Failed to build app state"),
    );
    let config = TestServerConfig::builder().http_transport().build();
    TestServer::new_with_config(routes::create_router(state), config)
        .expect("Failed to create test server")
}

/// Gateway relaying to an in-process upstream
pub fn gateway_with_upstream(upstream: Arc<dyn Upstream>) -> TestServer {
    let state = Arc::new(AppState::with_upstream(
        Config::for_upstream("http://upstream.invalid"),
        upstream,
    ));
    TestServer::new(routes::create_router(state)).expect("Failed to create test server")
}

/// Config with a short upstream timeout
pub fn config_with_timeout(base_url: &str, timeout: Duration) -> Config {
    let mut config = Config::for_upstream(base_url);
    config.upstream_timeout = timeout;
    config
}

/// Base URL on which nothing is listening
pub fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind a free port");
    let port = listener.local_addr().expect("No local address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

/// Assert the CORS grant and JSON content type every response must carry
pub fn assert_relay_headers(response: &axum_test::TestResponse) {
    assert_eq!(
        response.header("access-control-allow-origin"),
        HeaderValue::from_static("*")
    );
    assert_eq!(
        response.header("content-type"),
        HeaderValue::from_static("application/json")
    );
}
