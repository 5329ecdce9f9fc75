use std::time::Duration;

use reqwest::blocking::Client;

use crate::types::{ApiErrorBody, ChatRequest, ChatResponse};
use crate::{GenerationError, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// A single chat-completion round trip.
///
/// Implementors return the text of the first choice. They must not retry;
/// a failed round trip is reported to the caller as-is.
pub trait CompletionProvider: Send + Sync {
    fn complete(&self, request: &ChatRequest) -> Result<String>;
}

// ─── OpenAiConfig ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ─── OpenAiClient ─────────────────────────────────────────────────────────

/// Blocking client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// The underlying `reqwest` client pools connections and is safe to share
/// across threads.
pub struct OpenAiClient {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("wpcm/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            api_key: config.api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl CompletionProvider for OpenAiClient {
    fn complete(&self, request: &ChatRequest) -> Result<String> {
        tracing::debug!(
            model = %request.model,
            json = request.wants_json(),
            "chat completion request"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()?;

        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| body.trim().to_string());
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|source| GenerationError::Parse {
                body: body.clone(),
                source,
            })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::EmptyCompletion("no choices".to_string()))?;

        if let Some(refusal) = choice.message.refusal {
            return Err(GenerationError::Refusal(refusal));
        }

        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Ok(content),
            _ => Err(GenerationError::EmptyCompletion(
                choice.finish_reason.unwrap_or_else(|| "unknown".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn client_for(server: &mockito::Server) -> OpenAiClient {
        let mut config = OpenAiConfig::new("sk-test");
        config.base_url = server.url();
        OpenAiClient::new(config).unwrap()
    }

    fn request() -> ChatRequest {
        ChatRequest::new("gpt-4o", "be brief", "say hi", 0.5)
    }

    #[test]
    fn endpoint_strips_trailing_slash() {
        let mut config = OpenAiConfig::new("k");
        config.base_url = "http://localhost:9/v1/".to_string();
        let client = OpenAiClient::new(config).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:9/v1/chat/completions");
    }

    #[test]
    fn complete_returns_first_choice_content() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "model": "gpt-4o",
                "messages": [
                    {"role": "system", "content": "be brief"},
                    {"role": "user", "content": "say hi"}
                ]
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"hi"},"finish_reason":"stop"}]}"#)
            .create();

        let text = client_for(&server).complete(&request()).unwrap();
        assert_eq!(text, "hi");
        mock.assert();
    }

    #[test]
    fn json_request_sends_response_format() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "response_format": {"type": "json_object"}
            })))
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"{}"}}]}"#)
            .create();

        client_for(&server).complete(&request().json()).unwrap();
        mock.assert();
    }

    #[test]
    fn plain_request_omits_response_format() {
        let body = serde_json::to_value(request()).unwrap();
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn non_success_status_extracts_error_message() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#)
            .create();

        let err = client_for(&server).complete(&request()).unwrap_err();
        match err {
            GenerationError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "Rate limit reached");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn empty_content_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"  "},"finish_reason":"length"}]}"#)
            .create();

        let err = client_for(&server).complete(&request()).unwrap_err();
        assert!(matches!(err, GenerationError::EmptyCompletion(ref r) if r == "length"));
    }

    #[test]
    fn refusal_is_an_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":null,"refusal":"no"}}]}"#)
            .create();

        let err = client_for(&server).complete(&request()).unwrap_err();
        assert!(matches!(err, GenerationError::Refusal(_)));
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("<html>gateway</html>")
            .create();

        let err = client_for(&server).complete(&request()).unwrap_err();
        assert!(matches!(err, GenerationError::Parse { .. }));
    }

    #[test]
    fn debug_output_redacts_key() {
        let config = OpenAiConfig::new("sk-very-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-very-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
