//! Configuration management for Chatbridge
//!
//! Configuration is loaded from environment variables. The upstream base
//! address may be selected per deployment environment.

use std::env;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use url::Url;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Deployment environment name, if any
    pub environment: Option<String>,

    /// Upstream base address, without a trailing slash
    pub upstream_base_url: String,
    /// Upstream path the chat-turn endpoint forwards to
    pub upstream_chat_path: String,
    /// Bound on a single outbound call
    pub upstream_timeout: Duration,

    /// Log output format
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("CHATBRIDGE_ENV").filter(|v| !v.trim().is_empty());

        let per_env_url = environment
            .as_deref()
            .and_then(|name| lookup(&format!("UPSTREAM_BASE_URL_{}", name.to_uppercase())));

        let raw_base_url = match per_env_url.or_else(|| lookup("UPSTREAM_BASE_URL")) {
            Some(url) => url,
            None => bail!("UPSTREAM_BASE_URL must be set"),
        };

        let timeout_secs: u64 = lookup("UPSTREAM_TIMEOUT_SECONDS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("Invalid UPSTREAM_TIMEOUT_SECONDS")?;
        if timeout_secs == 0 {
            bail!("UPSTREAM_TIMEOUT_SECONDS must be greater than zero");
        }

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") => LogFormat::Json,
            Some("text") | None => LogFormat::Text,
            Some(other) => bail!("Invalid LOG_FORMAT: {other}"),
        };

        Ok(Self {
            host: lookup("CHATBRIDGE_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: lookup("CHATBRIDGE_PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("Invalid CHATBRIDGE_PORT")?,
            environment,
            upstream_base_url: normalize_base_url(&raw_base_url)?,
            upstream_chat_path: normalize_path(
                &lookup("UPSTREAM_CHAT_PATH").unwrap_or_else(|| "/chatbot".to_string()),
            ),
            upstream_timeout: Duration::from_secs(timeout_secs),
            log_format,
        })
    }

    /// Configuration pointing at the given upstream, with defaults elsewhere
    pub fn for_upstream(base_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            environment: None,
            upstream_base_url: base_url.trim_end_matches('/').to_string(),
            upstream_chat_path: "/chatbot".to_string(),
            upstream_timeout: Duration::from_secs(10),
            log_format: LogFormat::Text,
        }
    }
}

/// Validate an upstream base address and strip its trailing slash
fn normalize_base_url(raw: &str) -> Result<String> {
    let raw = raw.trim();
    let parsed = Url::parse(raw).with_context(|| format!("Invalid upstream base URL: {raw}"))?;
    match parsed.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        scheme => bail!("Unsupported upstream URL scheme: {scheme}"),
    }
}

fn normalize_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}
