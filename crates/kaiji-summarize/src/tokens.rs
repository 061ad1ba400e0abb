//! Token counting.
//!
//! All budget comparisons in the pipeline — chunk accumulation, summarizer
//! path selection, reduction termination — must use the same
//! [`TokenCounter`] instance, so budgets never drift between stages.

/// Counts tokens in text the way the target model's tokenizer would.
pub trait TokenCounter: Send + Sync {
    /// Number of tokens in `text`.
    fn count(&self, text: &str) -> usize;
}

/// Inexpensive model-free counter.
///
/// ASCII text averages roughly four characters per token in common BPE
/// vocabularies; CJK characters are usually one token each. This
/// overestimates slightly for mixed text, which errs on the safe side of a
/// budget.
#[derive(Clone, Copy, Debug, Default)]
pub struct HeuristicTokenCounter;

impl TokenCounter for HeuristicTokenCounter {
    fn count(&self, text: &str) -> usize {
        let (ascii, wide) = text
            .chars()
            .filter(|c| !c.is_whitespace())
            .fold((0usize, 0usize), |(ascii, wide), c| {
                if c.is_ascii() {
                    (ascii + 1, wide)
                } else {
                    (ascii, wide + 1)
                }
            });
        ascii.div_ceil(4) + wide
    }
}

/// HuggingFace tokenizer-backed counter.
///
/// Loads a `tokenizer.json` vocabulary and counts with the real model
/// tokenization. Falls back to [`HeuristicTokenCounter`] if an individual
/// encode fails, so counting never aborts a run.
#[cfg(feature = "hf-tokenizers")]
pub struct HfTokenCounter {
    tokenizer: tokenizers::Tokenizer,
}

#[cfg(feature = "hf-tokenizers")]
impl HfTokenCounter {
    /// Load a tokenizer from a `tokenizer.json` file.
    pub fn from_file(path: &std::path::Path) -> std::result::Result<Self, String> {
        let tokenizer = tokenizers::Tokenizer::from_file(path)
            .map_err(|e| format!("failed to load tokenizer from {}: {e}", path.display()))?;
        Ok(Self { tokenizer })
    }
}

#[cfg(feature = "hf-tokenizers")]
impl TokenCounter for HfTokenCounter {
    fn count(&self, text: &str) -> usize {
        match self.tokenizer.encode(text, false) {
            Ok(encoding) => encoding.len(),
            Err(e) => {
                tracing::warn!(error = %e, "tokenizer encode failed, using heuristic count");
                HeuristicTokenCounter.count(text)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
