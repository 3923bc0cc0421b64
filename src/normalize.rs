//! Upstream reply normalization
//!
//! Chatbot backends answer a chat turn in several envelope shapes. This module
//! classifies a raw upstream body into one [`Envelope`] and projects it into
//! the canonical [`ChatTurnReply`]. Normalization is total: every input,
//! including a missing body, produces a reply.

use serde_json::{Map, Value};
use tracing::warn;

use crate::models::ChatTurnReply;

/// Field names recognised for the end-of-session flag, in lookup order
pub const END_SESSION_FIELDS: &[&str] = &[
    "endSession",
    "shouldEndSession",
    "end_session",
    "should_end_session",
];

/// Reason an upstream body could not be used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Malformed {
    /// No body arrived at all
    Unreachable,
    /// Body is not JSON
    NotJson,
    /// Body is JSON but not an object
    NotAnObject,
    /// The `body` field of a wrapper holds neither an object nor an object encoded as JSON text
    BadWrappedBody,
}

impl Malformed {
    pub fn as_str(&self) -> &'static str {
        match self {
            Malformed::Unreachable => "unreachable",
            Malformed::NotJson => "not_json",
            Malformed::NotAnObject => "not_an_object",
            Malformed::BadWrappedBody => "bad_wrapped_body",
        }
    }
}

/// Upstream envelope shapes
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    /// Flat object carrying the reply fields
    Direct(Map<String, Value>),
    /// Object whose `body` field held the reply fields, already unwrapped
    GatewayWrapped(Map<String, Value>),
    Malformed(Malformed),
}

/// `null`, `false`, `0` and `""`
fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

impl Envelope {
    /// Classify a raw upstream body; `None` means the transport failed
    pub fn detect(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Envelope::Malformed(Malformed::Unreachable);
        };

        if raw.trim().is_empty() {
            return Envelope::Direct(Map::new());
        }

        let mut root = match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(root)) => root,
            Ok(_) => return Envelope::Malformed(Malformed::NotAnObject),
            Err(_) => return Envelope::Malformed(Malformed::NotJson),
        };

        // Exactly one level of unwrapping. A falsy `body` counts as absent.
        match root.remove("body") {
            None => Envelope::Direct(root),
            Some(body) if is_falsy(&body) => Envelope::Direct(root),
            Some(Value::String(inner)) => match serde_json::from_str::<Value>(&inner) {
                Ok(Value::Object(fields)) => Envelope::GatewayWrapped(fields),
                _ => Envelope::Malformed(Malformed::BadWrappedBody),
            },
            Some(Value::Object(fields)) => Envelope::GatewayWrapped(fields),
            Some(_) => Envelope::Malformed(Malformed::BadWrappedBody),
        }
    }

    /// Label used in logs and metrics
    pub fn label(&self) -> &'static str {
        match self {
            Envelope::Direct(_) => "direct",
            Envelope::GatewayWrapped(_) => "gateway_wrapped",
            Envelope::Malformed(_) => "malformed",
        }
    }

    /// Project the envelope into the canonical reply
    pub fn into_reply(self) -> ChatTurnReply {
        match self {
            Envelope::Direct(fields) | Envelope::GatewayWrapped(fields) => extract_reply(&fields),
            Envelope::Malformed(_) => ChatTurnReply::fallback(),
        }
    }
}

/// Normalize a raw upstream body into the canonical reply
pub fn normalize(raw: Option<&str>) -> ChatTurnReply {
    resolve(Envelope::detect(raw))
}

/// Project an already classified envelope, logging unusable ones
pub fn resolve(envelope: Envelope) -> ChatTurnReply {
    if let Envelope::Malformed(reason) = &envelope {
        warn!(reason = reason.as_str(), "Upstream reply unusable, using fallback");
    }
    envelope.into_reply()
}

fn extract_reply(fields: &Map<String, Value>) -> ChatTurnReply {
    ChatTurnReply {
        session_id: extract_session_id(fields),
        messages: extract_messages(fields),
        end_session: extract_end_session(fields),
    }
}

fn extract_session_id(fields: &Map<String, Value>) -> Option<String> {
    match fields.get("sessionId") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

fn extract_messages(fields: &Map<String, Value>) -> Vec<String> {
    match fields.get("messages") {
        Some(Value::Array(items)) => items.iter().filter_map(message_line).collect(),
        Some(_) => Vec::new(),
        None => fields
            .get("reply")
            .and_then(message_line)
            .into_iter()
            .collect(),
    }
}

/// Text of one message entry: a string, a `{"text": ...}` object or a scalar
fn message_line(entry: &Value) -> Option<String> {
    match entry {
        Value::String(text) => Some(text.clone()),
        Value::Object(obj) => obj.get("text").and_then(Value::as_str).map(str::to_string),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) => None,
    }
}

fn extract_end_session(fields: &Map<String, Value>) -> bool {
    END_SESSION_FIELDS
        .iter()
        .find_map(|name| fields.get(*name).and_then(Value::as_bool))
        .unwrap_or(false)
}
