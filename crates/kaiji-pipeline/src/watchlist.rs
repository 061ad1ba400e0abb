//! Watchlist file loading.

use std::collections::HashSet;
use std::path::Path;

use tracing::info;

use crate::errors::{PipelineError, Result};

/// Load watched company codes from a newline-delimited file.
///
/// Blank lines and `#` comments are ignored. An empty result is a startup
/// error, not a quiet no-op run.
pub async fn load_watchlist(path: &Path) -> Result<HashSet<String>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::WatchlistIo {
            path: path.display().to_string(),
            source,
        })?;

    let codes: HashSet<String> = raw
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_owned)
        .collect();

    if codes.is_empty() {
        return Err(PipelineError::EmptyWatchlist {
            path: path.display().to_string(),
        });
    }

    info!(companies = codes.len(), "watchlist loaded");
    Ok(codes)
}
