//! Text extraction seam.

use bytes::Bytes;

use crate::errors::{PipelineError, Result};

/// Extracts summarizable text from raw document bytes.
///
/// Actual PDF parsing lives behind this trait; the pipeline only sees the
/// extracted text.
pub trait TextExtractor: Send + Sync {
    /// Extract text from `data`.
    fn extract(&self, data: &Bytes) -> Result<String>;
}

/// Passthrough extractor for documents that are already plain UTF-8 text.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, data: &Bytes) -> Result<String> {
        std::str::from_utf8(data)
            .map(str::to_owned)
            .map_err(|e| PipelineError::Extraction(format!("document is not UTF-8 text: {e}")))
    }
}
