//! Summary output seam and filesystem implementation.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::errors::Result;

/// Receives finished summaries.
///
/// Delivery targets (drive folders, chat channels) implement this; the
/// pipeline hands over ordered parts and does not care where they land.
#[async_trait]
pub trait SummarySink: Send + Sync {
    /// Persist the summary parts for one document.
    async fn write(&self, doc_id: &str, parts: &[String]) -> Result<()>;
}

/// Writes summaries as Markdown files under a directory.
///
/// A single-part summary lands at `{doc_id}_summary.md`; a multi-part one
/// at `{doc_id}_summary_part_{n}.md` with 1-based part numbers.
pub struct FsSink {
    dir: PathBuf,
}

impl FsSink {
    /// Create a sink writing under `dir` (created on first write).
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn part_path(&self, doc_id: &str, index: usize, total: usize) -> PathBuf {
        if total == 1 {
            self.dir.join(format!("{doc_id}_summary.md"))
        } else {
            self.dir.join(format!("{doc_id}_summary_part_{}.md", index + 1))
        }
    }
}

#[async_trait]
impl SummarySink for FsSink {
    async fn write(&self, doc_id: &str, parts: &[String]) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir).await?;
        for (index, part) in parts.iter().enumerate() {
            let path = self.part_path(doc_id, index, parts.len());
            tokio::fs::write(&path, part).await?;
            debug!(doc_id, path = %path.display(), "summary part written");
        }
        info!(doc_id, parts = parts.len(), "summary written");
        Ok(())
    }
}
