//! # kaiji-llm
//!
//! Chat provider trait and OpenAI-compatible completion client.
//!
//! The summarizer depends only on the narrow [`ChatProvider`] seam:
//! role-tagged messages in, bounded-length text out, synchronously returned.
//! [`OpenAiProvider`] implements it over the OpenAI chat-completions wire
//! format (non-streaming).
//!
//! ## Crate Position
//!
//! Standalone (no kaiji crate dependencies).
//! Depended on by: kaiji-summarize, kaiji.

#![deny(unsafe_code)]

pub mod errors;
pub mod messages;
pub mod openai;
pub mod prompt;
pub mod provider;

pub use errors::{ApiErrorInfo, ProviderError, Result, parse_api_error};
pub use messages::{ChatMessage, Role};
pub use openai::{OpenAiConfig, OpenAiProvider};
pub use prompt::{PromptError, default_financial_prompt, load_prompt};
pub use provider::{ChatProvider, CompletionOptions};
