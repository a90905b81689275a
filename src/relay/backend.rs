use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

pub const GEMINI_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent";

/// Produces the reply text for one chat message. Failures are folded into the
/// reply itself, so the relay always answers.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    async fn reply(&self, message: &str) -> String;

    fn name(&self) -> &'static str;
}

/// Used when no API key is configured.
pub struct EchoBackend;

#[async_trait]
impl ReplyBackend for EchoBackend {
    async fn reply(&self, message: &str) -> String {
        format!("(local echo) You said: {message}")
    }

    fn name(&self) -> &'static str {
        "echo"
    }
}

pub struct GeminiBackend {
    client: Client,
    url: String,
    api_key: String,
    timeout: Duration,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiBackend {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_url(GEMINI_URL.to_string(), api_key, timeout)
    }

    pub fn with_url(url: String, api_key: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            url,
            api_key,
            timeout,
        }
    }

    async fn generate(&self, message: &str) -> Result<String> {
        let payload = json!({
            "contents": [
                { "parts": [ { "text": message } ] }
            ]
        });

        // `without_url` keeps the API key in the query string out of replies and logs.
        let response = self
            .client
            .post(&self.url)
            .query(&[("key", self.api_key.as_str())])
            .json(&payload)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;

        let data: GenerateContentResponse = response
            .json()
            .await
            .map_err(reqwest::Error::without_url)?;

        data.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| anyhow!("response carried no candidate text"))
    }
}

#[async_trait]
impl ReplyBackend for GeminiBackend {
    async fn reply(&self, message: &str) -> String {
        match self.generate(message).await {
            Ok(text) => text,
            Err(err) => {
                tracing::warn!(error = %err, "Gemini request failed");
                format!("Error talking to Gemini API: {err}")
            }
        }
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_reply() {
        assert_eq!(
            EchoBackend.reply("hello").await,
            "(local echo) You said: hello"
        );
    }

    #[tokio::test]
    async fn test_gemini_failure_becomes_reply() {
        // Nothing listens on port 9 on loopback; the connection is refused.
        let backend = GeminiBackend::with_url(
            "http://127.0.0.1:9/generate".to_string(),
            "secret-key".to_string(),
            Duration::from_secs(2),
        );
        let reply = backend.reply("hello").await;
        assert!(reply.starts_with("Error talking to Gemini API: "), "{reply}");
        assert!(!reply.contains("secret-key"));
    }

    #[test]
    fn test_candidate_text_shape() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"salam"}]}}]}"#;
        let parsed: GenerateContentResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "salam");
    }
}
