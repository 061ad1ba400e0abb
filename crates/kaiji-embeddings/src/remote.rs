//! Remote embedding provider speaking the OpenAI `/embeddings` wire format.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::errors::{EmbeddingError, Result};
use crate::service::EmbeddingService;

/// Remote embedding provider configuration.
#[derive(Clone, Debug)]
pub struct RemoteEmbeddingConfig {
    /// Embedding model identifier.
    pub model: String,
    /// API key for Bearer auth.
    pub api_key: String,
    /// API base URL (e.g. `https://api.openai.com/v1`).
    pub base_url: String,
    /// Expected output dimensions.
    pub dimensions: usize,
}

/// Remote OpenAI-compatible embedding provider.
pub struct RemoteEmbeddingService {
    config: RemoteEmbeddingConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsResponse {
    data: Vec<EmbeddingItem>,
}

#[derive(Debug, Deserialize)]
struct EmbeddingItem {
    index: usize,
    embedding: Vec<f32>,
}

impl RemoteEmbeddingService {
    /// Create a new remote embedding service.
    #[must_use]
    pub fn new(config: RemoteEmbeddingConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new remote embedding service with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: RemoteEmbeddingConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let _ = headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth_value = format!("Bearer {}", self.config.api_key);
        let _ = headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth_value)
                .map_err(|e| EmbeddingError::Inference(format!("invalid API key header: {e}")))?,
        );
        Ok(headers)
    }

    fn endpoint(&self) -> String {
        format!("{}/embeddings", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl EmbeddingService for RemoteEmbeddingService {
    #[instrument(skip_all, fields(model = %self.config.model, batch = texts.len()))]
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let body = serde_json::json!({
            "model": self.config.model,
            "input": texts,
        });
        let response = self
            .client
            .post(self.endpoint())
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "embeddings API error");
            return Err(EmbeddingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: EmbeddingsResponse = response
            .json()
            .await
            .map_err(|e| EmbeddingError::Inference(format!("malformed response: {e}")))?;
        if parsed.data.len() != texts.len() {
            return Err(EmbeddingError::Inference(format!(
                "expected {} vectors, got {}",
                texts.len(),
                parsed.data.len()
            )));
        }

        // The API may return items out of order; index restores input order.
        let mut vectors = vec![Vec::new(); texts.len()];
        for item in parsed.data {
            let slot = vectors
                .get_mut(item.index)
                .ok_or_else(|| EmbeddingError::Inference(format!("index {} out of range", item.index)))?;
            *slot = item.embedding;
        }

        debug!("embeddings received");
        Ok(vectors)
    }

    fn dimensions(&self) -> usize {
        self.config.dimensions
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
