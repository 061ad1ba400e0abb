//! Single-date registry client.
//!
//! One GET per date against the disclosure registry's `documents.json`
//! endpoint, filtered to watchlisted companies with renderable filings of a
//! recognized type. Transport-level non-success is recovered locally — the
//! per-date contract is a best-effort list — while
//! [`RegistryClient::try_fetch_for_date`] exposes the underlying outcome for
//! aggregators that isolate failures explicitly.

use std::collections::HashSet;
use std::time::Duration;

use bytes::Bytes;
use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use kaiji_core::DocumentRecord;

use crate::errors::{RegistryError, Result};
use crate::types::DocumentsResponse;

/// Leading bytes of a PDF document.
const PDF_MAGIC: &[u8] = b"%PDF-";

/// Registry document-format selector for PDF data.
const FORMAT_PDF: &str = "2";

/// Registry client configuration.
#[derive(Clone, Debug)]
pub struct RegistryConfig {
    /// Registry API base URL.
    pub base_url: String,
    /// Subscription key.
    pub api_key: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Client for the disclosure registry.
#[derive(Clone)]
pub struct RegistryClient {
    config: RegistryConfig,
    client: reqwest::Client,
}

impl RegistryClient {
    /// Create a new registry client.
    #[must_use]
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    /// Create a new registry client with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: RegistryConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    /// Fetch filings for one date, best-effort.
    ///
    /// Transport failures, a non-success status, and a malformed body are
    /// each logged and recovered as an empty list — an unavailable day reads
    /// as "no documents" with a warning, never as an error. No retry at
    /// this layer.
    pub async fn fetch_for_date(
        &self,
        date: NaiveDate,
        watchlist: &HashSet<String>,
    ) -> Vec<DocumentRecord> {
        match self.try_fetch_for_date(date, watchlist).await {
            Ok(records) => records,
            Err(e) => {
                warn!(%date, error = %e, "registry fetch failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Fetch filings for one date, surfacing the per-date outcome.
    #[instrument(skip_all, fields(%date, watchlist = watchlist.len()))]
    pub async fn try_fetch_for_date(
        &self,
        date: NaiveDate,
        watchlist: &HashSet<String>,
    ) -> Result<Vec<DocumentRecord>> {
        let url = format!("{}/documents.json", self.config.base_url.trim_end_matches('/'));
        let date_param = date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("date", date_param.as_str()),
                ("type", FORMAT_PDF),
                ("Subscription-Key", self.config.api_key.as_str()),
            ])
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistryError::Unavailable {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let parsed: DocumentsResponse = serde_json::from_str(&body)?;

        let total = parsed.results.len();
        let records: Vec<DocumentRecord> = parsed
            .results
            .into_iter()
            .filter(|raw| raw.matches(watchlist))
            .filter_map(|raw| raw.into_record(date))
            .collect();

        info!(listed = total, retained = records.len(), "date fetch complete");
        Ok(records)
    }

    /// Fetch the PDF bytes for one document, or `None`.
    ///
    /// Validates the `%PDF-` magic header before treating the data as
    /// usable; anything else (transport failure, non-success, wrong format)
    /// is logged and yields `None`.
    #[instrument(skip_all, fields(doc_id))]
    pub async fn fetch_document(&self, doc_id: &str) -> Option<Bytes> {
        let url = format!(
            "{}/documents/{doc_id}",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("type", FORMAT_PDF),
                ("Subscription-Key", self.config.api_key.as_str()),
            ])
            .timeout(self.config.timeout)
            .send()
            .await
            .inspect_err(|e| warn!(doc_id, error = %e, "document fetch failed"))
            .ok()?;

        let status = response.status();
        if !status.is_success() {
            warn!(doc_id, status = status.as_u16(), "document fetch non-success");
            return None;
        }

        let bytes = response
            .bytes()
            .await
            .inspect_err(|e| warn!(doc_id, error = %e, "document body read failed"))
            .ok()?;

        if !bytes.starts_with(PDF_MAGIC) {
            warn!(doc_id, "document is not valid PDF data");
            return None;
        }

        debug!(doc_id, size = bytes.len(), "document fetched");
        Some(bytes)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
