//! Chat turn records exchanged with callers

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Line returned whenever the upstream cannot produce a usable reply
pub const FALLBACK_MESSAGE: &str = "⚠ Backend not reachable";

/// Inbound chat turn
///
/// Parsed leniently and only to read the caller's session id; the body is
/// forwarded upstream byte for byte regardless.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnRequest {
    /// Absent means "start a new session"; numeric ids are kept as decimal text
    #[serde(default, deserialize_with = "session_id_from_value")]
    pub session_id: Option<String>,
    #[serde(default, alias = "text", alias = "inputText")]
    pub message: Option<String>,
}

impl ChatTurnRequest {
    /// Best-effort parse of an inbound body; anything unreadable yields an empty turn
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

fn session_id_from_value<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => Some(id),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    })
}

/// Canonical reply, the only shape ever returned from the chat-turn endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnReply {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default)]
    pub messages: Vec<String>,
    #[serde(default)]
    pub end_session: bool,
}

impl ChatTurnReply {
    /// Reply used on every transport or parse failure
    pub fn fallback() -> Self {
        Self {
            session_id: None,
            messages: vec![FALLBACK_MESSAGE.to_string()],
            end_session: false,
        }
    }

    pub fn is_fallback(&self) -> bool {
        self.session_id.is_none()
            && !self.end_session
            && self.messages.len() == 1
            && self.messages[0] == FALLBACK_MESSAGE
    }

    /// Serialize to the JSON text sent to callers
    pub fn to_json(&self) -> String {
        // Plain strings and a bool cannot fail to serialize.
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"messages":["{FALLBACK_MESSAGE}"],"endSession":false}}"#)
        })
    }
}
