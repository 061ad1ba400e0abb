//! Prompt-message loading.
//!
//! Summarization requests are prefixed with a configurable prompt preamble,
//! loaded from a JSON file of the form `{"messages": [{"role", "content"}]}`.
//! When no file is configured, the compiled financial-report prompt applies.

use std::path::Path;

use serde::Deserialize;

use crate::messages::ChatMessage;

/// Errors loading a prompt file.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// File could not be read.
    #[error("failed to read prompt file: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid prompt JSON.
    #[error("failed to parse prompt file: {0}")]
    Json(#[from] serde_json::Error),

    /// File parsed but contains no messages.
    #[error("prompt file contains no messages")]
    Empty,
}

#[derive(Debug, Deserialize)]
struct PromptFile {
    messages: Vec<ChatMessage>,
}

/// Load prompt messages from a JSON file.
pub fn load_prompt(path: &Path) -> Result<Vec<ChatMessage>, PromptError> {
    let raw = std::fs::read_to_string(path)?;
    let parsed: PromptFile = serde_json::from_str(&raw)?;
    if parsed.messages.is_empty() {
        return Err(PromptError::Empty);
    }
    Ok(parsed.messages)
}

/// The compiled default prompt for financial disclosure summaries.
#[must_use]
pub fn default_financial_prompt() -> Vec<ChatMessage> {
    vec![ChatMessage::system(
        "You are a financial analyst. Summarize the following excerpt from a \
         Japanese regulatory disclosure filing. Preserve concrete figures \
         (revenue, profit, guidance) and stated risks. Write concise Markdown.",
    )]
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
