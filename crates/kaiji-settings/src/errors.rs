//! Settings error types.

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Errors produced while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// A required credential or setting is absent. Fatal at startup.
    #[error("required configuration {key:?} is missing")]
    Missing {
        /// Name of the missing key (env var or settings field).
        key: String,
    },

    /// Settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// Settings file is not valid JSON for the expected schema.
    #[error("failed to parse settings file: {0}")]
    Json(#[from] serde_json::Error),
}
