//! Token-budgeted semantic chunking.
//!
//! A document is segmented into sentence-level units on terminator
//! characters, then units are greedily accumulated into chunks while the
//! running token count stays within the budget. Boundary placement is
//! deterministic for fixed input and budget; embedding instrumentation
//! observes grouping quality but never moves a boundary.

use std::sync::Arc;

use tracing::{debug, warn};

use kaiji_embeddings::{EmbeddingService, cosine_similarity};

use crate::tokens::TokenCounter;

/// Sentence terminators: ASCII and full-width Japanese.
const TERMINATORS: [char; 6] = ['.', '!', '?', '。', '！', '？'];

/// One token-budgeted contiguous slice of a source document.
///
/// Chunks are ordered; concatenating them in order reproduces the unit
/// sequence of the source (whitespace-normalized, empty units discarded).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text: its units joined with single spaces.
    pub content: String,
    /// Sum of the unit token counts, as measured by the pipeline's
    /// [`TokenCounter`]. At most the chunk budget, except for an oversized
    /// single unit which stands alone.
    pub token_count: usize,
}

/// Splits text into token-budgeted chunks.
pub struct Chunker {
    counter: Arc<dyn TokenCounter>,
    max_chunk_tokens: usize,
}

impl Chunker {
    /// Create a chunker with the shared token counter and a per-chunk budget.
    #[must_use]
    pub fn new(counter: Arc<dyn TokenCounter>, max_chunk_tokens: usize) -> Self {
        Self {
            counter,
            max_chunk_tokens,
        }
    }

    /// Segment `text` into sentence-level units.
    ///
    /// Terminators stay attached to their unit; whitespace-only units are
    /// discarded; a trailing fragment without a terminator is kept.
    #[must_use]
    pub fn segment_units(text: &str) -> Vec<String> {
        let mut units = Vec::new();
        let mut current = String::new();
        for c in text.chars() {
            current.push(c);
            if TERMINATORS.contains(&c) {
                let trimmed = current.trim();
                if !trimmed.is_empty() {
                    units.push(trimmed.to_owned());
                }
                current.clear();
            }
        }
        let trimmed = current.trim();
        if !trimmed.is_empty() {
            units.push(trimmed.to_owned());
        }
        units
    }

    /// Split `text` into chunks of at most `max_chunk_tokens` tokens.
    ///
    /// A single unit that alone exceeds the budget becomes its own chunk —
    /// units are never split mid-sentence, and nothing is silently truncated.
    #[must_use]
    pub fn split(&self, text: &str) -> Vec<TextChunk> {
        self.accumulate(Self::segment_units(text))
    }

    /// Like [`Chunker::split`], additionally logging embedding-based grouping
    /// quality (mean and minimum adjacent-unit cosine similarity).
    ///
    /// Instrumentation failures are logged and ignored; boundaries are
    /// identical to [`Chunker::split`] in all cases.
    pub async fn split_instrumented(
        &self,
        text: &str,
        embedder: &dyn EmbeddingService,
    ) -> Vec<TextChunk> {
        let units = Self::segment_units(text);
        match embedder.embed(&units).await {
            Ok(vectors) if vectors.len() >= 2 => {
                let similarities: Vec<f32> = vectors
                    .windows(2)
                    .map(|pair| cosine_similarity(&pair[0], &pair[1]))
                    .collect();
                let mean = similarities.iter().sum::<f32>() / similarities.len() as f32;
                let min = similarities.iter().copied().fold(f32::INFINITY, f32::min);
                debug!(
                    units = units.len(),
                    mean_adjacent_similarity = mean,
                    min_adjacent_similarity = min,
                    "chunk grouping instrumentation"
                );
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "embedding instrumentation failed, continuing"),
        }
        self.accumulate(units)
    }

    fn accumulate(&self, units: Vec<String>) -> Vec<TextChunk> {
        let mut chunks = Vec::new();
        let mut current: Vec<String> = Vec::new();
        let mut current_tokens = 0usize;

        for unit in units {
            let unit_tokens = self.counter.count(&unit);

            if !current.is_empty() && current_tokens + unit_tokens > self.max_chunk_tokens {
                chunks.push(TextChunk {
                    content: current.join(" "),
                    token_count: current_tokens,
                });
                current.clear();
                current_tokens = 0;
            }

            if unit_tokens > self.max_chunk_tokens {
                // Oversized atomic unit: stands alone, never split mid-unit.
                warn!(
                    unit_tokens,
                    budget = self.max_chunk_tokens,
                    "sentence exceeds chunk budget, emitting oversized chunk"
                );
                chunks.push(TextChunk {
                    content: unit,
                    token_count: unit_tokens,
                });
                continue;
            }

            current.push(unit);
            current_tokens += unit_tokens;
        }

        if !current.is_empty() {
            chunks.push(TextChunk {
                content: current.join(" "),
                token_count: current_tokens,
            });
        }

        debug!(chunks = chunks.len(), "text split into chunks");
        chunks
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use kaiji_embeddings::MockEmbeddingService;

    /// One token per sentence-unit regardless of content — pins the grouping
    /// examples without tokenizer ambiguity.
    struct UnitCounter;
    impl TokenCounter for UnitCounter {
        fn count(&self, _text: &str) -> usize {
            1
        }
    }

    /// One token per whitespace-separated word.
    struct WordCounter;
    impl TokenCounter for WordCounter {
        fn count(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    fn word_chunker(budget: usize) -> Chunker {
        Chunker::new(Arc::new(WordCounter), budget)
    }

    // ── segment_units ────────────────────────────────────────────────────

    #[test]
    fn segments_on_ascii_terminators() {
        let units = Chunker::segment_units("A. B! C?");
        assert_eq!(units, vec!["A.", "B!", "C?"]);
    }

    #[test]
    fn segments_on_japanese_terminators() {
        let units = Chunker::segment_units("売上高は増加した。利益は減少した。");
        assert_eq!(units, vec!["売上高は増加した。", "利益は減少した。"]);
    }

    #[test]
    fn whitespace_only_units_discarded() {
        let units = Chunker::segment_units("A. . .  B.");
        assert_eq!(units, vec!["A.", "B."]);
    }

    #[test]
    fn trailing_fragment_kept() {
        let units = Chunker::segment_units("First sentence. trailing fragment");
        assert_eq!(units, vec!["First sentence.", "trailing fragment"]);
    }

    #[test]
    fn empty_text_yields_no_units() {
        assert!(Chunker::segment_units("").is_empty());
        assert!(Chunker::segment_units("  \n ").is_empty());
    }

    // ── split ────────────────────────────────────────────────────────────

    #[test]
    fn groups_pairs_under_unit_budget() {
        // Spec example: "A. B. C." with each sentence costing 1 token and a
        // budget of 2 groups the first two, then the third alone.
        let chunker = Chunker::new(Arc::new(UnitCounter), 2);
        let chunks = chunker.split("A. B. C.");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "A. B.");
        assert_eq!(chunks[0].token_count, 2);
        assert_eq!(chunks[1].content, "C.");
        assert_eq!(chunks[1].token_count, 1);
    }

    #[test]
    fn budget_one_yields_single_sentence_chunks() {
        let chunker = Chunker::new(Arc::new(UnitCounter), 1);
        let chunks = chunker.split("A. B. C.");
        assert_eq!(chunks.len(), 3);
        for c in &chunks {
            assert_eq!(c.token_count, 1);
        }
    }

    #[test]
    fn never_exceeds_budget_except_oversized_singleton() {
        let chunker = word_chunker(4);
        let text = "one two three. four five. six seven eight nine ten eleven. twelve.";
        let chunks = chunker.split(text);
        for chunk in &chunks {
            let is_single_unit = Chunker::segment_units(&chunk.content).len() == 1;
            assert!(
                chunk.token_count <= 4 || is_single_unit,
                "non-singleton chunk over budget: {chunk:?}"
            );
        }
        // The 6-word sentence stands alone, oversized
        let oversized: Vec<_> = chunks.iter().filter(|c| c.token_count > 4).collect();
        assert_eq!(oversized.len(), 1);
        assert_eq!(
            oversized[0].content,
            "six seven eight nine ten eleven."
        );
    }

    #[test]
    fn oversized_first_sentence_emits_no_empty_chunk() {
        let chunker = word_chunker(2);
        let chunks = chunker.split("one two three four. five.");
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].content, "one two three four.");
        assert_eq!(chunks[1].content, "five.");
        assert!(chunks.iter().all(|c| !c.content.is_empty()));
    }

    #[test]
    fn concatenation_reproduces_unit_sequence() {
        let chunker = word_chunker(3);
        let text = "alpha beta. gamma. delta epsilon. zeta. eta theta.";
        let chunks = chunker.split(text);
        let rejoined = chunks
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, Chunker::segment_units(text).join(" "));
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let chunker = word_chunker(5);
        let text = "a b c. d e f. g. h i j k. l m.";
        assert_eq!(chunker.split(text), chunker.split(text));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        let chunker = word_chunker(5);
        assert!(chunker.split("").is_empty());
    }

    // ── split_instrumented ───────────────────────────────────────────────

    #[tokio::test]
    async fn instrumentation_does_not_move_boundaries() {
        let chunker = word_chunker(3);
        let text = "alpha beta. gamma delta. epsilon. zeta eta theta.";
        let embedder = MockEmbeddingService::new(32);
        let instrumented = chunker.split_instrumented(text, &embedder).await;
        assert_eq!(instrumented, chunker.split(text));
    }

    proptest::proptest! {
        #[test]
        fn prop_no_chunk_over_budget_unless_singleton(
            sentences in proptest::collection::vec("[a-z]{1,8}( [a-z]{1,8}){0,9}\\.", 1..20),
            budget in 1usize..12,
        ) {
            let text = sentences.join(" ");
            let chunker = word_chunker(budget);
            for chunk in chunker.split(&text) {
                let units = Chunker::segment_units(&chunk.content);
                proptest::prop_assert!(chunk.token_count <= budget || units.len() == 1);
            }
        }
    }
}
