//! Summarization error types.

use kaiji_llm::ProviderError;

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, SummarizeError>;

/// Errors from the summarization stage.
///
/// A failed model call always propagates — a missing summary is a
/// data-completeness problem the orchestrator must decide how to handle
/// (skip the document or abort the run), so it is never silently masked.
#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    /// The underlying model call failed for a chunk or a merge step.
    #[error("summarization failed: {0}")]
    Provider(#[from] ProviderError),

    /// There was nothing to summarize.
    #[error("no chunks to summarize")]
    EmptyInput,
}
