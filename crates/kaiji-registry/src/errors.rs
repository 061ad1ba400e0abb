//! Registry error types.
//!
//! Per-date failures are recovered locally — the registry contract is
//! "best-effort list, never throws for transport-level non-success" — but
//! the error values exist so the range aggregator can consume per-date
//! outcomes explicitly instead of relying on catch blocks.

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Errors from one registry query.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Transport-level failure (connect, timeout, body read).
    #[error("registry transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Non-success response for one date.
    #[error("registry unavailable (status {status})")]
    Unavailable {
        /// HTTP status code.
        status: u16,
    },

    /// Response body is not valid structured data.
    #[error("malformed registry response: {0}")]
    Malformed(#[from] serde_json::Error),
}
