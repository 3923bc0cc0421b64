//! Chatbridge - chat gateway in front of interchangeable chatbot backends
//!
//! This library relays chat turns to one configured upstream and reduces
//! whatever envelope the upstream answers with into a single canonical reply.

pub mod config;
pub mod error;
pub mod models;
pub mod normalize;
pub mod proxy;
pub mod routes;

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::models::{ChatTurnReply, ChatTurnRequest};
pub use crate::normalize::{normalize, Envelope};
pub use crate::proxy::{Forwarder, HttpUpstream, Upstream};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    pub start_time: Instant,
    /// Relays calls to the configured upstream
    pub forwarder: Arc<Forwarder>,
}

impl AppState {
    /// Create a new application state with an HTTP upstream
    pub fn new(config: Config) -> Result<Self> {
        let upstream: Arc<dyn Upstream> = Arc::new(HttpUpstream::from_config(&config)?);
        Ok(Self::with_upstream(config, upstream))
    }

    /// Create application state around an arbitrary upstream transport
    pub fn with_upstream(config: Config, upstream: Arc<dyn Upstream>) -> Self {
        let forwarder = Arc::new(Forwarder::new(upstream, config.upstream_base_url.clone()));

        Self {
            config,
            start_time: Instant::now(),
            forwarder,
        }
    }
}
