//! The [`ChatProvider`] trait — the narrow seam between summarization and
//! whichever language-model service backs it.

use async_trait::async_trait;

use crate::errors::Result;
use crate::messages::ChatMessage;

/// Per-request generation options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CompletionOptions {
    /// Upper bound on generated tokens, passed through to the provider.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
}

impl Default for CompletionOptions {
    fn default() -> Self {
        Self {
            max_tokens: 2000,
            temperature: 0.7,
        }
    }
}

/// A synchronous-return text generation service.
///
/// Given role-tagged messages and an output bound, returns the generated
/// text. Failures propagate — no partial or degraded output is returned.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate a completion for `messages`.
    async fn complete(&self, messages: &[ChatMessage], options: &CompletionOptions)
    -> Result<String>;

    /// Model identifier this provider targets.
    fn model(&self) -> &str;
}
