//! Message and envelope types for the send protocol
//!
//! Outbound messages travel inside a JSON-RPC 2.0 `message/send` request.
//! Replies carry artifacts with content parts; only text parts are consumed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// JSON-RPC method used to deliver a message to a remote agent
pub const MESSAGE_SEND_METHOD: &str = "message/send";

/// Role of the message sender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Agent,
}

/// A single typed content payload within a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Part {
    Text { text: String },
}

/// An outbound message addressed to a remote agent
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboundMessage {
    pub role: Role,
    pub parts: Vec<Part>,
    pub message_id: String,
}

impl OutboundMessage {
    /// Create a user message with a single text part and a fresh message id
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            parts: vec![Part::Text { text: text.into() }],
            message_id: Uuid::new_v4().simple().to_string(),
        }
    }
}

/// JSON-RPC 2.0 request envelope for [`MESSAGE_SEND_METHOD`]
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    pub jsonrpc: &'static str,
    pub id: String,
    pub method: &'static str,
    pub params: MessageSendParams,
}

/// Parameters of a send request
#[derive(Debug, Clone, Serialize)]
pub struct MessageSendParams {
    pub message: OutboundMessage,
}

impl SendMessageRequest {
    pub fn new(message: OutboundMessage) -> Self {
        Self {
            jsonrpc: "2.0",
            id: Uuid::new_v4().to_string(),
            method: MESSAGE_SEND_METHOD,
            params: MessageSendParams { message },
        }
    }
}

/// Extract the reply text from a response document.
///
/// Scans `result.artifacts[*].parts[*]` in order and returns the first
/// `text` payload found. Returns `None` when the response has no such part.
pub fn reply_text(response: &Value) -> Option<String> {
    let artifacts = response.get("result")?.get("artifacts")?.as_array()?;
    for artifact in artifacts {
        let parts = match artifact.get("parts").and_then(Value::as_array) {
            Some(parts) => parts,
            None => continue,
        };
        for part in parts {
            if let Some(text) = part.get("text").and_then(Value::as_str) {
                return Some(text.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_user_message_wire_shape() {
        let message = OutboundMessage::user("hi");
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["role"], "user");
        assert_eq!(value["parts"], json!([{"kind": "text", "text": "hi"}]));
        // uuid4 hex, no hyphens
        assert_eq!(value["messageId"].as_str().unwrap().len(), 32);
    }

    #[test]
    fn test_message_ids_are_unique() {
        let a = OutboundMessage::user("hi");
        let b = OutboundMessage::user("hi");
        assert_ne!(a.message_id, b.message_id);
    }

    #[test]
    fn test_send_request_envelope() {
        let request = SendMessageRequest::new(OutboundMessage::user("hi"));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["jsonrpc"], "2.0");
        assert_eq!(value["method"], "message/send");
        assert!(!value["id"].as_str().unwrap().is_empty());
        assert_eq!(value["params"]["message"]["parts"][0]["text"], "hi");
    }

    #[test]
    fn test_reply_text_returns_first_textual_part() {
        let response = json!({
            "result": {
                "artifacts": [
                    {"parts": [{"kind": "data", "data": {"rows": 3}}]},
                    {"parts": [{"text": "first"}, {"text": "second"}]}
                ]
            }
        });
        assert_eq!(reply_text(&response), Some("first".to_string()));
    }

    #[test]
    fn test_reply_text_skips_artifacts_without_parts() {
        let response = json!({
            "result": {
                "artifacts": [
                    {"name": "empty"},
                    {"parts": [{"text": "ok"}]}
                ]
            }
        });
        assert_eq!(reply_text(&response), Some("ok".to_string()));
    }

    #[test]
    fn test_reply_text_missing_shape() {
        assert_eq!(reply_text(&json!({"result": {"status": "completed"}})), None);
        assert_eq!(reply_text(&json!({"result": {"artifacts": []}})), None);
        assert_eq!(reply_text(&json!({})), None);
    }
}
