//! # kaiji-summarize
//!
//! Token-budgeted chunking and recursive merge summarization.
//!
//! - [`tokens::TokenCounter`]: pluggable token counting, one instance per
//!   pipeline run so budgets never drift between stages
//! - [`chunker::Chunker`]: sentence segmentation + greedy token-budgeted
//!   accumulation, with optional embedding instrumentation
//! - [`summarizer::Summarizer`]: single-shot whole-document summarization
//!   and balanced binary merge reduction for oversized inputs
//! - [`result::SummaryResult`]: transport-ceiling part splitting
//!
//! ## Crate Position
//!
//! Depends on kaiji-core, kaiji-llm, kaiji-embeddings.
//! Depended on by: kaiji-pipeline, kaiji.

#![deny(unsafe_code)]

pub mod chunker;
pub mod errors;
pub mod result;
pub mod summarizer;
pub mod tokens;

pub use chunker::{Chunker, TextChunk};
pub use errors::{Result, SummarizeError};
pub use result::SummaryResult;
pub use summarizer::Summarizer;
pub use tokens::{HeuristicTokenCounter, TokenCounter};
#[cfg(feature = "hf-tokenizers")]
pub use tokens::HfTokenCounter;
