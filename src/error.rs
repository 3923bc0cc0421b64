//! Error types for Chatbridge
//!
//! Transport failures toward the upstream are modelled by [`UpstreamError`]
//! and are always recovered into a fallback reply. [`AppError`] covers the
//! few faults raised outside the relay itself.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::proxy::headers::apply_cors_headers;

/// Failure of the single outbound call to the upstream
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Upstream timed out")]
    Timeout,

    #[error("Upstream connection failed: {0}")]
    Connect(String),

    #[error("Upstream response body could not be read: {0}")]
    Body(String),

    #[error("Upstream transport error: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::Timeout => "timeout",
            UpstreamError::Connect(_) => "connect",
            UpstreamError::Body(_) => "body",
            UpstreamError::Transport(_) => "transport",
        }
    }
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_connect() {
            UpstreamError::Connect(err.to_string())
        } else if err.is_body() || err.is_decode() {
            UpstreamError::Body(err.to_string())
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error details
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::MethodNotAllowed(msg) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                msg.clone(),
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message,
            },
        };

        let mut response = (status, Json(body)).into_response();
        apply_cors_headers(response.headers_mut());
        response
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
