//! Pipeline error types.

use thiserror::Error;

/// Errors arising while processing a batch.
///
/// Variants other than the watchlist ones are document-level failures; the
/// runner consumes them per document so one filing's failure never aborts
/// its siblings.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Text extraction from document bytes failed.
    #[error("text extraction failed: {0}")]
    Extraction(String),

    /// Summarization failed.
    #[error(transparent)]
    Summarize(#[from] kaiji_summarize::SummarizeError),

    /// Writing the summary artifact failed.
    #[error("failed to write summary: {0}")]
    Sink(#[from] std::io::Error),

    /// The watchlist file could not be read.
    #[error("failed to read watchlist {path}: {source}")]
    WatchlistIo {
        /// Watchlist file path.
        path: String,
        /// Underlying read error.
        source: std::io::Error,
    },

    /// The watchlist file contained no company codes.
    #[error("watchlist {path} contains no company codes")]
    EmptyWatchlist {
        /// Watchlist file path.
        path: String,
    },
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, PipelineError>;
