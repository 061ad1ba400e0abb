//! OpenAI-compatible chat-completions provider.
//!
//! Non-streaming: one POST to `/chat/completions`, one text result. Bearer
//! auth, JSON body. Works against any endpoint speaking the OpenAI wire
//! format.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use crate::errors::{ProviderError, Result, parse_api_error};
use crate::messages::ChatMessage;
use crate::provider::{ChatProvider, CompletionOptions};

/// Default API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI provider configuration.
#[derive(Clone, Debug)]
pub struct OpenAiConfig {
    /// Model identifier.
    pub model: String,
    /// API key for Bearer auth.
    pub api_key: String,
    /// Override base URL (proxies, compatible endpoints).
    pub base_url: Option<String>,
}

/// OpenAI-compatible chat-completions provider.
pub struct OpenAiProvider {
    config: OpenAiConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider.
    #[must_use]
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: OpenAiConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Build HTTP headers for the request.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth_value = format!("Bearer {}", self.config.api_key);
        let _ = headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value).map_err(|e| ProviderError::Auth {
                message: format!("invalid API key header: {e}"),
            })?,
        );
        Ok(headers)
    }

    fn build_request<'a>(
        &'a self,
        messages: &'a [ChatMessage],
        options: &CompletionOptions,
    ) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: options.max_tokens,
            temperature: options.temperature,
        }
    }

    fn endpoint(&self) -> String {
        let base = self.config.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        format!("{}/chat/completions", base.trim_end_matches('/'))
    }
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    #[instrument(skip_all, fields(model = %self.config.model, message_count = messages.len()))]
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<String> {
        let request = self.build_request(messages, options);
        debug!(
            max_tokens = options.max_tokens,
            temperature = options.temperature,
            "sending completion request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers()?)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(|secs| secs * 1000);
            let body = response.text().await.unwrap_or_default();
            let info = parse_api_error(&body, status.as_u16());
            error!(
                status = status.as_u16(),
                code = info.code.as_deref().unwrap_or("unknown"),
                retryable = info.retryable,
                "completion API error"
            );
            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited {
                    retry_after_ms: retry_after.unwrap_or(0),
                    message: info.message,
                });
            }
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: info.message,
                code: info.code,
                retryable: info.retryable,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_owned())
            .filter(|c| !c.is_empty())
            .ok_or(ProviderError::EmptyCompletion)?;

        debug!(chars = content.len(), "completion received");
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.config.model
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: Option<String>) -> OpenAiConfig {
        OpenAiConfig {
            model: "gpt-4o-mini".into(),
            api_key: "test-key".into(),
            base_url,
        }
    }

    fn completion_body(text: &str) -> serde_json::Value {
        serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": text}}]
        })
    }

    // ── Headers and request shape ────────────────────────────────────────

    #[test]
    fn headers_has_bearer_auth() {
        let provider = OpenAiProvider::new(test_config(None));
        let headers = provider.build_headers().unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer test-key");
        assert_eq!(headers[CONTENT_TYPE], "application/json");
    }

    #[test]
    fn endpoint_default_base() {
        let provider = OpenAiProvider::new(test_config(None));
        assert_eq!(provider.endpoint(), "https://api.openai.com/v1/chat/completions");
    }

    #[test]
    fn endpoint_trims_trailing_slash() {
        let provider = OpenAiProvider::new(test_config(Some("http://localhost:1234/".into())));
        assert_eq!(provider.endpoint(), "http://localhost:1234/chat/completions");
    }

    #[test]
    fn model_returns_config_model() {
        let provider = OpenAiProvider::new(test_config(None));
        assert_eq!(provider.model(), "gpt-4o-mini");
    }

    // ── Completion behavior ──────────────────────────────────────────────

    #[tokio::test]
    async fn complete_returns_trimmed_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer test-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("  summary  ")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(Some(server.uri())));
        let messages = [ChatMessage::user("summarize")];
        let result = provider
            .complete(&messages, &CompletionOptions::default())
            .await
            .unwrap();
        assert_eq!(result, "summary");
    }

    #[tokio::test]
    async fn complete_passes_max_tokens_bound() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(serde_json::json!({
                "model": "gpt-4o-mini",
                "max_tokens": 777
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(completion_body("ok")))
            .expect(1)
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(Some(server.uri())));
        let options = CompletionOptions {
            max_tokens: 777,
            temperature: 0.7,
        };
        let result = provider
            .complete(&[ChatMessage::user("x")], &options)
            .await
            .unwrap();
        assert_eq!(result, "ok");
    }

    #[tokio::test]
    async fn server_error_is_retryable_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "error": {"message": "overloaded", "code": "server_error"}
            })))
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(Some(server.uri())));
        let err = provider
            .complete(&[ChatMessage::user("x")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(
            err,
            ProviderError::Api {
                status: 500,
                retryable: true,
                ..
            }
        );
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(429)
                    .insert_header("retry-after", "3")
                    .set_body_json(serde_json::json!({"error": {"message": "slow down"}})),
            )
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(Some(server.uri())));
        let err = provider
            .complete(&[ChatMessage::user("x")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(
            err,
            ProviderError::RateLimited {
                retry_after_ms: 3000,
                ..
            }
        );
    }

    #[tokio::test]
    async fn empty_choices_is_empty_completion() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"choices": []})),
            )
            .mount(&server)
            .await;

        let provider = OpenAiProvider::new(test_config(Some(server.uri())));
        let err = provider
            .complete(&[ChatMessage::user("x")], &CompletionOptions::default())
            .await
            .unwrap_err();
        assert_matches!(err, ProviderError::EmptyCompletion);
    }
}
