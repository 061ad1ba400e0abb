//! Provider error types and API error-body parsing.

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, ProviderError>;

/// Errors from a language-model provider call.
///
/// Model failures always surface to the caller — a missing summary is a
/// data-completeness problem the caller decides how to handle.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success API response.
    #[error("api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Provider-supplied or fallback message.
        message: String,
        /// Provider error code when present.
        code: Option<String>,
        /// Whether retrying may succeed (429/5xx).
        retryable: bool,
    },

    /// Rate limited by the provider.
    #[error("rate limited: {message}")]
    RateLimited {
        /// Suggested wait from the `retry-after` header, 0 when absent.
        retry_after_ms: u64,
        /// Provider-supplied or fallback message.
        message: String,
    },

    /// Credential could not be encoded into a request header.
    #[error("auth error: {message}")]
    Auth {
        /// What went wrong.
        message: String,
    },

    /// Request or response body serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider returned a response with no usable completion text.
    #[error("provider returned an empty completion")]
    EmptyCompletion,
}

/// Parsed fields from a provider error body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiErrorInfo {
    /// Human-readable message.
    pub message: String,
    /// Provider error code when present.
    pub code: Option<String>,
    /// Whether the status suggests a retry may succeed.
    pub retryable: bool,
}

/// Parse an OpenAI-style error body (`{"error": {"message", "code"|"type"}}`),
/// falling back to the raw body text when it is not structured.
#[must_use]
pub fn parse_api_error(body: &str, status: u16) -> ApiErrorInfo {
    let retryable = status == 429 || status >= 500;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(err) = value.get("error") {
            let message = err
                .get("message")
                .and_then(serde_json::Value::as_str)
                .unwrap_or(body)
                .to_owned();
            let code = err
                .get("code")
                .or_else(|| err.get("type"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned);
            return ApiErrorInfo {
                message,
                code,
                retryable,
            };
        }
    }

    ApiErrorInfo {
        message: if body.is_empty() {
            format!("http status {status}")
        } else {
            body.to_owned()
        },
        code: None,
        retryable,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
