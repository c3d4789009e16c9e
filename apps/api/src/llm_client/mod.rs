/// LLM Client — the single point of entry for all OpenRouter calls in PresenceCV.
///
/// ARCHITECTURAL RULE: No other module may call the provider API directly.
/// All LLM interactions MUST go through this module.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// Client-identifying header value sent with every provider call.
const X_TITLE: &str = "PresenceCV";
/// Token cap for the chat passthrough. Resume calls are uncapped.
const CHAT_MAX_TOKENS: u32 = 500;
/// Per-request timeout for the chat passthrough.
const CHAT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("OpenRouter API key not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("request to provider timed out")]
    Timeout,

    #[error("API error (status {status}): {body}")]
    Api { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Http(e)
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (OpenRouter-compatible /chat/completions)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

impl ResponseFormat {
    fn json_object() -> Self {
        Self {
            format_type: "json_object",
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Value>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat passthrough reply returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
    pub model: String,
    pub usage: Option<Value>,
}

// ────────────────────────────────────────────────────────────────────────────
// Completion seam
// ────────────────────────────────────────────────────────────────────────────

/// The completion seam the resume pipeline calls through.
/// Implemented by `LlmClient` in production and by scripted mocks in tests.
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// One chat-completion exchange requesting JSON-only output.
    /// No retry at this layer; retry policy lives with the callers.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// The single LLM client used by all services in PresenceCV.
/// Wraps the OpenRouter chat-completions endpoint.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Self {
        Self {
            // No global timeout: resume calls run unbounded; the chat path
            // sets a per-request timeout instead.
            client: Client::new(),
            base_url: config.openrouter_base_url.trim_end_matches('/').to_string(),
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
        }
    }

    /// The configured default model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_key(&self) -> Result<&str, LlmError> {
        self.api_key.as_deref().ok_or(LlmError::MissingApiKey)
    }

    async fn post_completion(
        &self,
        request: &ChatCompletionRequest<'_>,
        timeout: Option<Duration>,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let api_key = self.api_key()?;
        let url = format!("{}/chat/completions", self.base_url);

        let mut builder = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("X-Title", X_TITLE)
            .json(request);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("OpenRouter returned {status}: {body}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    /// Relays a single user message to the provider (chat passthrough).
    ///
    /// Fails fast with `MissingApiKey` before any network I/O. Capped at
    /// `CHAT_MAX_TOKENS`, bounded by `CHAT_TIMEOUT`.
    pub async fn fetch_chat_response(
        &self,
        message: &str,
        model: &str,
    ) -> Result<ChatReply, LlmError> {
        self.api_key()?;

        let request = ChatCompletionRequest {
            model,
            messages: vec![Message {
                role: "user",
                content: message,
            }],
            max_tokens: Some(CHAT_MAX_TOKENS),
            response_format: None,
        };

        let response = self.post_completion(&request, Some(CHAT_TIMEOUT)).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        Ok(ChatReply {
            response: content,
            model: model.to_string(),
            usage: response.usage,
        })
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: user,
                },
            ],
            max_tokens: None,
            response_format: Some(ResponseFormat::json_object()),
        };

        let response = self.post_completion(&request, None).await?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        debug!("completion call succeeded ({} bytes)", content.len());
        Ok(content)
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences some models wrap
/// around JSON output despite the json_object response format.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    match text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
    {
        Some(inner) => {
            let inner = inner.trim_start();
            inner.strip_suffix("```").map_or(inner, str::trim)
        }
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client_without_key() -> LlmClient {
        LlmClient::new(&Config {
            openrouter_api_key: None,
            openrouter_base_url: "https://openrouter.ai/api/v1".to_string(),
            openrouter_model: "openai/gpt-4o-mini".to_string(),
            port: 8080,
            rust_log: "info".to_string(),
        })
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_chat_request_omits_unset_optional_fields() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-4o-mini",
            messages: vec![Message {
                role: "user",
                content: "Hello",
            }],
            max_tokens: None,
            response_format: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert!(json.get("response_format").is_none());
    }

    #[test]
    fn test_json_object_response_format_wire_shape() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-4o-mini",
            messages: vec![],
            max_tokens: Some(500),
            response_format: Some(ResponseFormat::json_object()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["response_format"]["type"], "json_object");
        assert_eq!(json["max_tokens"], 500);
    }

    #[test]
    fn test_response_parses_without_usage() {
        let body = r#"{"choices": [{"message": {"content": "hi"}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("hi"));
        assert!(parsed.usage.is_none());
    }

    #[tokio::test]
    async fn test_chat_fails_fast_without_api_key() {
        let client = client_without_key();
        let result = client.fetch_chat_response("Hello", "gpt-x").await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }

    #[tokio::test]
    async fn test_completion_fails_fast_without_api_key() {
        let client = client_without_key();
        let result = client.complete("system", "user").await;
        assert!(matches!(result, Err(LlmError::MissingApiKey)));
    }
}
