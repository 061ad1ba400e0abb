//! # kaiji-core
//!
//! Foundation types for the kaiji disclosure pipeline.
//!
//! This crate provides the shared vocabulary that all other kaiji crates
//! depend on:
//!
//! - **Documents**: [`document::DocumentRecord`] and the recognized
//!   [`document::DocTypeCode`] disclosure types
//! - **Dates**: [`dates::DateRange`] (inclusive calendar range) and
//!   [`dates::parse_date_token`] (`YYYY-MM-DD` or `yesterday`)
//! - **Text**: UTF-8-safe helpers in [`text`]
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other kaiji crates.

#![deny(unsafe_code)]

pub mod dates;
pub mod document;
pub mod text;

pub use dates::{DateError, DateRange, parse_date_token};
pub use document::{DocTypeCode, DocumentRecord};
