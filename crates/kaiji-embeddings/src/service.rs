//! Embedding service trait and deterministic mock.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::errors::{EmbeddingError, Result};
use crate::normalize::l2_normalize;

/// Trait for embedding text into vectors.
///
/// In this pipeline embeddings inform chunk-grouping instrumentation only;
/// they never affect chunk boundaries.
#[async_trait]
pub trait EmbeddingService: Send + Sync {
    /// Embed a batch of texts, one vector per input in order.
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Output embedding dimensions.
    fn dimensions(&self) -> usize;
}

/// Mock embedding service for testing.
///
/// Generates deterministic unit vectors by hashing input text with SHA-256
/// and using the hash bytes as component seeds.
pub struct MockEmbeddingService {
    dims: usize,
}

impl MockEmbeddingService {
    /// Create a new mock service with the given dimensions.
    #[must_use]
    pub fn new(dims: usize) -> Self {
        Self { dims }
    }

    fn hash_to_vector(&self, text: &str) -> Vec<f32> {
        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        let mut v: Vec<f32> = (0..self.dims)
            .map(|i| {
                let byte_idx = i % hash.len();
                // Map byte to [-1, 1]
                (f32::from(hash[byte_idx]) / 127.5) - 1.0
            })
            .collect();

        l2_normalize(&mut v);
        v
    }
}

#[async_trait]
impl EmbeddingService for MockEmbeddingService {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.dims == 0 {
            return Err(EmbeddingError::Inference("zero dimensions".into()));
        }
        Ok(texts.iter().map(|t| self.hash_to_vector(t)).collect())
    }

    fn dimensions(&self) -> usize {
        self.dims
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
