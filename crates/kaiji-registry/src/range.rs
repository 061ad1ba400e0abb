//! Concurrent multi-date fan-out.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use tracing::{info, instrument, warn};

use kaiji_core::{DateRange, DocumentRecord};

use crate::client::RegistryClient;

/// Fans a date range out over the registry with bounded concurrency.
pub struct RangeFetcher {
    client: RegistryClient,
    max_concurrency: usize,
}

impl RangeFetcher {
    /// Create a fetcher over `client` with at most `max_concurrency`
    /// in-flight date requests. A concurrency of zero is clamped to one.
    #[must_use]
    pub fn new(client: RegistryClient, max_concurrency: usize) -> Self {
        Self {
            client,
            max_concurrency: max_concurrency.max(1),
        }
    }

    /// Fetch filings for every date in `range`.
    ///
    /// Each date resolves independently; a failed date is logged and
    /// contributes nothing, and never poisons its neighbours. Results are
    /// ordered by date regardless of completion order.
    #[instrument(skip_all, fields(start = %range.start(), end = %range.end(), days = range.days()))]
    pub async fn fetch_range(
        &self,
        range: &DateRange,
        watchlist: &HashSet<String>,
    ) -> Vec<DocumentRecord> {
        let mut outcomes: Vec<_> = stream::iter(range.iter())
            .map(|date| async move {
                (date, self.client.try_fetch_for_date(date, watchlist).await)
            })
            .buffer_unordered(self.max_concurrency)
            .collect()
            .await;

        outcomes.sort_by_key(|(date, _)| *date);

        let mut records = Vec::new();
        let mut failed_days = 0usize;
        for (date, outcome) in outcomes {
            match outcome {
                Ok(batch) => records.extend(batch),
                Err(e) => {
                    failed_days += 1;
                    warn!(%date, error = %e, "date fetch failed, skipping");
                }
            }
        }

        info!(
            records = records.len(),
            failed_days, "range fetch complete"
        );
        records
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
