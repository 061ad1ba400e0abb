//! Embedding error types.

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors from an embedding service.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    /// Transport-level failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success API response.
    #[error("embeddings api error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or fallback message.
        message: String,
    },

    /// The service returned a malformed or incomplete result.
    #[error("inference error: {0}")]
    Inference(String),
}
