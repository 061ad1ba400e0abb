//! Batch orchestration.
//!
//! The runner walks the records a [`DocumentSource`] yields for a date
//! range, pushes each through extract, chunk, summarize, and sink, and
//! keeps score. Documents are independent units of work: a failure is
//! logged against its document and the batch moves on.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::{info, instrument, warn};

use kaiji_core::{DateRange, DocumentRecord};
use kaiji_embeddings::EmbeddingService;
use kaiji_registry::{RangeFetcher, RegistryClient};
use kaiji_summarize::{Chunker, Summarizer, SummaryResult};

use crate::errors::Result;
use crate::extract::TextExtractor;
use crate::sink::SummarySink;

/// Where documents come from.
#[async_trait]
pub trait DocumentSource: Send + Sync {
    /// Matching document records for a date range.
    async fn list(&self, range: &DateRange, watchlist: &HashSet<String>)
    -> Vec<DocumentRecord>;

    /// Raw bytes for one document, or `None` when unavailable.
    async fn fetch_bytes(&self, doc_id: &str) -> Option<Bytes>;
}

/// [`DocumentSource`] backed by the disclosure registry.
pub struct RegistrySource {
    fetcher: RangeFetcher,
    client: RegistryClient,
}

impl RegistrySource {
    /// Wrap a registry client for listing and byte fetches.
    #[must_use]
    pub fn new(client: RegistryClient, max_concurrency: usize) -> Self {
        Self {
            fetcher: RangeFetcher::new(client.clone(), max_concurrency),
            client,
        }
    }
}

#[async_trait]
impl DocumentSource for RegistrySource {
    async fn list(
        &self,
        range: &DateRange,
        watchlist: &HashSet<String>,
    ) -> Vec<DocumentRecord> {
        self.fetcher.fetch_range(range, watchlist).await
    }

    async fn fetch_bytes(&self, doc_id: &str) -> Option<Bytes> {
        self.client.fetch_document(doc_id).await
    }
}

/// Counts for one batch run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Records matched in the registry listings.
    pub fetched: usize,
    /// Documents summarized and written to the sink.
    pub summarized: usize,
    /// Documents skipped before summarization (no bytes, no text).
    pub skipped: usize,
    /// Documents that failed mid-processing.
    pub failed: usize,
}

enum Outcome {
    Summarized,
    Skipped,
}

/// Orchestrates one batch of documents end to end.
pub struct Pipeline {
    source: Arc<dyn DocumentSource>,
    extractor: Arc<dyn TextExtractor>,
    chunker: Chunker,
    summarizer: Summarizer,
    sink: Arc<dyn SummarySink>,
    embedder: Option<Arc<dyn EmbeddingService>>,
    max_input_tokens: usize,
    summary_part_chars: usize,
}

impl Pipeline {
    /// Assemble a pipeline from its stages.
    #[must_use]
    pub fn new(
        source: Arc<dyn DocumentSource>,
        extractor: Arc<dyn TextExtractor>,
        chunker: Chunker,
        summarizer: Summarizer,
        sink: Arc<dyn SummarySink>,
        max_input_tokens: usize,
        summary_part_chars: usize,
    ) -> Self {
        Self {
            source,
            extractor,
            chunker,
            summarizer,
            sink,
            embedder: None,
            max_input_tokens,
            summary_part_chars,
        }
    }

    /// Attach an embedding service for chunk-grouping instrumentation.
    ///
    /// Instrumentation only: chunk boundaries are identical with or without
    /// it.
    #[must_use]
    pub fn with_embedder(mut self, embedder: Arc<dyn EmbeddingService>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    /// Run one batch over `range`, returning per-document counts.
    #[instrument(skip_all, fields(start = %range.start(), end = %range.end()))]
    pub async fn run(&self, range: &DateRange, watchlist: &HashSet<String>) -> RunReport {
        let records = self.source.list(range, watchlist).await;
        let mut report = RunReport {
            fetched: records.len(),
            ..RunReport::default()
        };

        for record in &records {
            match self.process(record).await {
                Ok(Outcome::Summarized) => report.summarized += 1,
                Ok(Outcome::Skipped) => report.skipped += 1,
                Err(e) => {
                    report.failed += 1;
                    warn!(doc_id = %record.doc_id, error = %e, "document failed, continuing batch");
                }
            }
        }

        info!(
            fetched = report.fetched,
            summarized = report.summarized,
            skipped = report.skipped,
            failed = report.failed,
            "batch complete"
        );
        report
    }

    #[instrument(skip_all, fields(doc_id = %record.doc_id))]
    async fn process(&self, record: &DocumentRecord) -> Result<Outcome> {
        let Some(data) = self.source.fetch_bytes(&record.doc_id).await else {
            warn!("document bytes unavailable, skipping");
            return Ok(Outcome::Skipped);
        };

        let text = self.extractor.extract(&data)?;
        let chunks = match &self.embedder {
            Some(embedder) => self.chunker.split_instrumented(&text, embedder.as_ref()).await,
            None => self.chunker.split(&text),
        };
        if chunks.is_empty() {
            warn!("document yielded no text, skipping");
            return Ok(Outcome::Skipped);
        }

        let input_tokens = self.summarizer.single_shot_input_tokens(&chunks);
        let summary = if input_tokens <= self.max_input_tokens {
            self.summarizer.summarize(&chunks).await?
        } else {
            info!(input_tokens, "input exceeds single-shot budget, reducing");
            self.summarizer.summarize_reduced(&chunks).await?
        };

        let parts = SummaryResult::new(summary).into_parts(self.summary_part_chars);
        self.sink.write(&record.doc_id, &parts).await?;
        Ok(Outcome::Summarized)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
