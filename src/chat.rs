use crate::error::{ChatError, ChatResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_CHAT_ENDPOINT: &str = "http://127.0.0.1:5000/api/chat";

/// Shown when the service answers without a usable `reply`.
pub const NO_REPLY_PLACEHOLDER: &str = "[no reply]";

/// Shown for any transport or decoding failure ("error talking to the Gemini backend").
pub const CHAT_ERROR_MESSAGE: &str = "خطا در ارتباط با بک‌اند Gemini.";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

pub fn build_chat_request(text: &str) -> ChatRequest {
    ChatRequest {
        message: text.to_string(),
    }
}

/// Extract the reply text from a response body.
///
/// Only a body that is not JSON at all, or is JSON `null`, is an error. Any
/// other shape yields either the `reply` field or the placeholder.
pub fn parse_chat_response(body: &str) -> ChatResult<String> {
    match serde_json::from_str::<Value>(body)? {
        Value::Null => Err(ChatError::NullBody),
        Value::Object(map) => Ok(reply_text(map.get("reply"))),
        _ => Ok(NO_REPLY_PLACEHOLDER.to_string()),
    }
}

fn reply_text(reply: Option<&Value>) -> String {
    match reply {
        Some(Value::String(text)) if !text.is_empty() => text.clone(),
        Some(Value::Bool(true)) => "true".to_string(),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => n.to_string(),
        Some(value @ (Value::Array(_) | Value::Object(_))) => value.to_string(),
        _ => NO_REPLY_PLACEHOLDER.to_string(),
    }
}

/// Sends one chat request and hands back the raw response body.
#[async_trait(?Send)]
pub trait ChatTransport {
    async fn send(&self, request: &ChatRequest) -> ChatResult<String>;
}

pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> ChatResult<String> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            // The body is still decoded; a JSON error body renders like any reply.
            tracing::warn!(%status, endpoint = %self.endpoint, "chat endpoint returned an error status");
        }
        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_string(&build_chat_request("hello")).unwrap();
        assert_eq!(body, r#"{"message":"hello"}"#);
    }

    #[test]
    fn test_reply_field() {
        assert_eq!(
            parse_chat_response(r#"{"reply":"hi there"}"#).unwrap(),
            "hi there"
        );
    }

    #[test]
    fn test_missing_or_falsy_reply_uses_placeholder() {
        for body in [
            r#"{}"#,
            r#"{"reply":null}"#,
            r#"{"reply":""}"#,
            r#"{"reply":false}"#,
            r#"{"reply":0}"#,
            r#"{"error":"boom"}"#,
            r#"[1,2]"#,
            r#""text""#,
        ] {
            assert_eq!(parse_chat_response(body).unwrap(), NO_REPLY_PLACEHOLDER, "{body}");
        }
    }

    #[test]
    fn test_non_string_reply_is_rendered() {
        assert_eq!(parse_chat_response(r#"{"reply":42}"#).unwrap(), "42");
        assert_eq!(parse_chat_response(r#"{"reply":true}"#).unwrap(), "true");
    }

    #[test]
    fn test_invalid_bodies_are_errors() {
        assert!(matches!(
            parse_chat_response("<html>502</html>"),
            Err(ChatError::Decode(_))
        ));
        assert!(matches!(parse_chat_response("null"), Err(ChatError::NullBody)));
        assert!(parse_chat_response("").is_err());
    }
}
