//! # kaiji-pipeline
//!
//! Per-document orchestration: list filings for a date range, fetch and
//! extract each document's text, chunk, summarize, and hand the result to
//! a [`SummarySink`]. Documents are isolated units: one failure is counted
//! and logged, siblings proceed.
//!
//! ## Crate Position
//!
//! Depends on: kaiji-core, kaiji-registry, kaiji-summarize.
//! Depended on by: kaiji.

#![deny(unsafe_code)]

pub mod errors;
pub mod extract;
pub mod runner;
pub mod sink;
pub mod watchlist;

pub use errors::{PipelineError, Result};
pub use extract::{PlainTextExtractor, TextExtractor};
pub use runner::{DocumentSource, Pipeline, RegistrySource, RunReport};
pub use sink::{FsSink, SummarySink};
pub use watchlist::load_watchlist;
