//! Proxy module
//!
//! Handles request forwarding to the chatbot upstream.

pub mod forwarder;
pub mod headers;
pub mod logging;
pub mod upstream;

pub use forwarder::{Forwarder, InboundRequest, Relay};
pub use upstream::{HttpUpstream, Upstream, UpstreamRequest, UpstreamResponse};
