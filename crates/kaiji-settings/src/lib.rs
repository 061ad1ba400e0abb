//! # kaiji-settings
//!
//! Layered configuration for the kaiji disclosure pipeline.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** — [`KaijiSettings::default()`]
//! 2. **JSON file** — deep-merged over defaults
//! 3. **Environment variables** — `KAIJI_*` overrides (highest priority)
//!
//! There is no global settings singleton: [`load_from_path`] returns a value
//! the caller owns and passes down explicitly. Secrets (the registry
//! subscription key, the LLM API key) are read only from the environment via
//! [`require_env`]; their absence is fatal at startup.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{apply_env_overrides, deep_merge, load_from_path, require_env};
pub use types::*;
