//! # kaiji-embeddings
//!
//! Embedding service trait and remote provider.
//!
//! Chunking quality is instrumented with sentence embeddings: adjacent-unit
//! cosine similarity is logged so grouping drift is observable. Embeddings
//! never influence chunk boundaries.
//!
//! ## Crate Position
//!
//! Standalone (no kaiji crate dependencies).
//! Depended on by: kaiji-summarize, kaiji-pipeline, kaiji.

#![deny(unsafe_code)]

pub mod errors;
pub mod normalize;
pub mod remote;
pub mod service;

pub use errors::{EmbeddingError, Result};
pub use normalize::{cosine_similarity, l2_norm, l2_normalize};
pub use remote::{RemoteEmbeddingConfig, RemoteEmbeddingService};
pub use service::{EmbeddingService, MockEmbeddingService};
