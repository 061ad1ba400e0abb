//! # kaiji-registry
//!
//! Disclosure-registry retrieval: per-date document listings and PDF bytes.
//!
//! [`RegistryClient`] issues one listing request per calendar date and
//! filters the response down to watchlisted companies with renderable
//! filings of a recognized type. [`RangeFetcher`] fans a [`DateRange`] out
//! over the client with bounded concurrency, isolating per-date failures.
//!
//! ## Crate Position
//!
//! Depends on: kaiji-core.
//! Depended on by: kaiji-pipeline, kaiji.
//!
//! [`DateRange`]: kaiji_core::DateRange

#![deny(unsafe_code)]

pub mod client;
pub mod errors;
pub mod range;
pub mod types;

pub use client::{RegistryClient, RegistryConfig};
pub use errors::{RegistryError, Result};
pub use range::RangeFetcher;
pub use types::{DocumentsResponse, RawDocument, PDF_FLAG_SET};
