//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` and implement
//! [`Default`] with production default values. `#[serde(default)]` allows
//! partial JSON — missing fields get their default value during
//! deserialization.

use serde::{Deserialize, Serialize};

/// Root settings type for the kaiji pipeline.
///
/// Loaded from a JSON file deep-merged over defaults, then overridden by
/// `KAIJI_*` environment variables. Secrets (API keys) are never stored
/// here — they come from the environment at startup.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct KaijiSettings {
    /// Settings schema version.
    pub version: String,
    /// Disclosure registry settings.
    pub registry: RegistrySettings,
    /// Chunking and summarization budgets.
    pub summarize: SummarizeSettings,
    /// Language-model provider settings.
    pub llm: LlmSettings,
    /// Embedding instrumentation settings.
    pub embedding: EmbeddingSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for KaijiSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            registry: RegistrySettings::default(),
            summarize: SummarizeSettings::default(),
            llm: LlmSettings::default(),
            embedding: EmbeddingSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl KaijiSettings {
    /// Clamp out-of-range values and correct invalid invariants.
    ///
    /// Called automatically during loading. Out-of-range values are clamped
    /// with a warning rather than rejected, so users get corrected behavior
    /// instead of a confusing error.
    pub fn validate(&mut self) {
        if self.registry.max_concurrency == 0 {
            tracing::warn!("registry maxConcurrency of 0 corrected to 1");
            self.registry.max_concurrency = 1;
        }
        if self.summarize.max_chunk_tokens == 0 {
            tracing::warn!("summarize maxChunkTokens of 0 corrected to 1");
            self.summarize.max_chunk_tokens = 1;
        }
        if self.summarize.summary_part_chars == 0 {
            tracing::warn!("summarize summaryPartChars of 0 corrected to 1");
            self.summarize.summary_part_chars = 1;
        }
        if self.summarize.max_input_tokens < self.summarize.max_summary_tokens {
            tracing::warn!(
                "summarize maxInputTokens ({}) < maxSummaryTokens ({}), correcting",
                self.summarize.max_input_tokens,
                self.summarize.max_summary_tokens
            );
            self.summarize.max_input_tokens = self.summarize.max_summary_tokens;
        }
        let t = self.llm.temperature;
        if !(0.0..=2.0).contains(&t) {
            let clamped = t.clamp(0.0, 2.0);
            tracing::warn!("llm temperature out of range ({t}), clamped to {clamped}");
            self.llm.temperature = clamped;
        }
    }
}

/// Disclosure registry (EDINET) settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrySettings {
    /// Registry API base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Bounded fan-out width for the range fetcher. The registry is
    /// rate-sensitive, so unbounded fan-out risks throttling.
    pub max_concurrency: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self {
            base_url: "https://disclosure.edinet-fsa.go.jp/api/v2".to_string(),
            timeout_secs: 10,
            max_concurrency: 10,
        }
    }
}

/// Token budgets for chunking and summarization.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SummarizeSettings {
    /// Maximum tokens per chunk.
    pub max_chunk_tokens: usize,
    /// Upper bound requested for the final summary.
    pub max_summary_tokens: usize,
    /// Largest single-request input; above this the recursive reduction
    /// path is used instead of one whole-document request.
    pub max_input_tokens: usize,
    /// Character ceiling per emitted summary part.
    pub summary_part_chars: usize,
}

impl Default for SummarizeSettings {
    fn default() -> Self {
        Self {
            max_chunk_tokens: 2000,
            max_summary_tokens: 2000,
            max_input_tokens: 12_000,
            summary_part_chars: 10_000,
        }
    }
}

/// Language-model provider settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmSettings {
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// Model identifier.
    pub model: String,
    /// Sampling temperature (0.0–2.0).
    pub temperature: f32,
    /// Optional path to a prompt-messages JSON file; the compiled
    /// financial-report prompt is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt_path: Option<String>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            temperature: 0.7,
            prompt_path: None,
        }
    }
}

/// Embedding instrumentation settings.
///
/// Embeddings never influence chunk boundaries; when enabled they only log
/// grouping-quality signals.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmbeddingSettings {
    /// Whether chunking computes instrumentation embeddings.
    pub enabled: bool,
    /// OpenAI-compatible embeddings API base URL.
    pub base_url: String,
    /// Embedding model identifier.
    pub model: String,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            base_url: "https://api.openai.com/v1".to_string(),
            model: "text-embedding-3-small".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Default tracing filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
