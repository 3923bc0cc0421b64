//! Upstream transport abstraction
//!
//! Defines the seam between the Forwarder and the network so the chatbot
//! backend can be swapped for a fake in tests.

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use bytes::Bytes;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::error::UpstreamError;
use crate::proxy::headers::build_outbound_headers;

/// One outbound call, fully resolved
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    pub method: Method,
    pub url: String,
    /// `None` for read-only methods
    pub body: Option<Bytes>,
}

/// Raw upstream answer; the body is not assumed to be JSON
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Trait defining the interface to a chatbot backend
///
/// Implementations issue exactly one call per `send` and never retry.
#[async_trait]
pub trait Upstream: Send + Sync {
    /// Transport name for logging
    fn name(&self) -> &'static str;

    /// Send the request and read the whole response body as text
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError>;
}

/// HTTP upstream backed by a pooled reqwest client
pub struct HttpUpstream {
    client: reqwest::Client,
}

impl HttpUpstream {
    /// Wrap an existing client
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client whose timeout bounds every call
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .timeout(config.upstream_timeout)
            .build()?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl Upstream for HttpUpstream {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: UpstreamRequest) -> Result<UpstreamResponse, UpstreamError> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(build_outbound_headers());

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        debug!(status = %status, body_len = body.len(), "Upstream body read");

        Ok(UpstreamResponse { status, body })
    }
}
