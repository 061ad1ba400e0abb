//! Whole-document and recursive merge summarization.
//!
//! The single-shot path submits all chunks as one request. When the joined
//! input would blow the model's input budget, the reduction path summarizes
//! each chunk, then merges summaries by balanced binary recursion: split the
//! list at the midpoint, reduce each half, summarize the pair. Depth is
//! O(log N) in the number of chunks, and the left/right pairing order is
//! stable, so the reduction is deterministic for a deterministic provider.

use std::sync::Arc;

use futures::future::BoxFuture;
use tracing::{debug, info, instrument};

use kaiji_core::text::preview;
use kaiji_llm::{ChatMessage, ChatProvider, CompletionOptions};

use crate::chunker::TextChunk;
use crate::errors::{Result, SummarizeError};
use crate::tokens::TokenCounter;

/// Separator between chunks in a single-shot request.
const CHUNK_SEPARATOR: &str = "\n\n";

/// Reduces chunk sequences into one bounded-length summary.
pub struct Summarizer {
    provider: Arc<dyn ChatProvider>,
    counter: Arc<dyn TokenCounter>,
    prompt: Vec<ChatMessage>,
    max_summary_tokens: usize,
    temperature: f32,
}

impl Summarizer {
    /// Create a summarizer.
    ///
    /// `counter` must be the same instance used for chunking, so budget
    /// comparisons cannot drift between stages.
    #[must_use]
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        counter: Arc<dyn TokenCounter>,
        prompt: Vec<ChatMessage>,
        max_summary_tokens: usize,
        temperature: f32,
    ) -> Self {
        Self {
            provider,
            counter,
            prompt,
            max_summary_tokens,
            temperature,
        }
    }

    /// Tokens in the single-shot request input for `chunks`, prompt included.
    ///
    /// Callers use this against the model's input budget to pick between
    /// [`Summarizer::summarize`] and [`Summarizer::summarize_reduced`].
    #[must_use]
    pub fn single_shot_input_tokens(&self, chunks: &[TextChunk]) -> usize {
        let prompt_tokens: usize = self.prompt.iter().map(|m| self.counter.count(&m.content)).sum();
        let body = join_contents(chunks, CHUNK_SEPARATOR);
        prompt_tokens + self.counter.count(&body)
    }

    /// Summarize all chunks in one request (default whole-document path).
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    pub async fn summarize(&self, chunks: &[TextChunk]) -> Result<String> {
        if chunks.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }
        let body = join_contents(chunks, CHUNK_SEPARATOR);
        let summary = self.request(&body).await?;
        info!(chars = summary.len(), "single-shot summary complete");
        Ok(summary)
    }

    /// Summarize via recursive binary reduction.
    ///
    /// Each chunk is summarized independently, then the summary list is
    /// merged: while the space-joined concatenation exceeds
    /// `max_summary_tokens`, split at the midpoint, reduce each half, and
    /// summarize the two half-summaries joined; once it fits, summarize it
    /// once more into the final result.
    #[instrument(skip_all, fields(chunks = chunks.len()))]
    pub async fn summarize_reduced(&self, chunks: &[TextChunk]) -> Result<String> {
        if chunks.is_empty() {
            return Err(SummarizeError::EmptyInput);
        }

        let mut leaf_summaries = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            leaf_summaries.push(self.request(&chunk.content).await?);
        }

        let summary = self.reduce(leaf_summaries).await?;
        info!(chars = summary.len(), "reduced summary complete");
        Ok(summary)
    }

    /// Balanced binary reduction over a list of summaries.
    ///
    /// Boxed because async recursion needs an explicit future type. A
    /// single summary that alone exceeds the budget is not split further —
    /// the final request's output bound still applies.
    fn reduce(&self, summaries: Vec<String>) -> BoxFuture<'_, Result<String>> {
        Box::pin(async move {
            let combined = summaries.join(" ");
            let tokens = self.counter.count(&combined);

            if tokens <= self.max_summary_tokens || summaries.len() <= 1 {
                return self.request(&combined).await;
            }

            debug!(
                summaries = summaries.len(),
                tokens, "summaries exceed budget, splitting at midpoint"
            );
            let mut left_half = summaries;
            let right_half = left_half.split_off(left_half.len() / 2);

            let left = self.reduce(left_half).await?;
            let right = self.reduce(right_half).await?;
            self.request(&format!("{left} {right}")).await
        })
    }

    async fn request(&self, content: &str) -> Result<String> {
        let mut messages = self.prompt.clone();
        messages.push(ChatMessage::user(content.to_owned()));
        let options = CompletionOptions {
            max_tokens: self.max_summary_tokens as u32,
            temperature: self.temperature,
        };
        let summary = self.provider.complete(&messages, &options).await?;
        debug!(summary = %preview(&summary, 100), "summary step complete");
        Ok(summary)
    }
}

fn join_contents(chunks: &[TextChunk], separator: &str) -> String {
    chunks
        .iter()
        .map(|c| c.content.as_str())
        .collect::<Vec<_>>()
        .join(separator)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use kaiji_llm::{ProviderError, Role};
    use std::sync::Mutex;

    /// One token per whitespace-separated word.
    struct WordCounter;
    impl TokenCounter for WordCounter {
        fn count(&self, text: &str) -> usize {
            text.split_whitespace().count()
        }
    }

    /// Deterministic provider: echoes the user content and records every
    /// request together with the `max_tokens` bound it was given.
    struct EchoProvider {
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl EchoProvider {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, u32)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ChatProvider for EchoProvider {
        async fn complete(
            &self,
            messages: &[ChatMessage],
            options: &CompletionOptions,
        ) -> kaiji_llm::Result<String> {
            let user = messages
                .iter()
                .rev()
                .find(|m| m.role == Role::User)
                .expect("request has a user message");
            self.calls
                .lock()
                .unwrap()
                .push((user.content.clone(), options.max_tokens));
            Ok(user.content.clone())
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    /// Provider that always fails.
    struct FailingProvider;

    #[async_trait]
    impl ChatProvider for FailingProvider {
        async fn complete(
            &self,
            _messages: &[ChatMessage],
            _options: &CompletionOptions,
        ) -> kaiji_llm::Result<String> {
            Err(ProviderError::EmptyCompletion)
        }

        fn model(&self) -> &str {
            "failing"
        }
    }

    fn chunk(content: &str) -> TextChunk {
        TextChunk {
            content: content.to_owned(),
            token_count: content.split_whitespace().count(),
        }
    }

    fn summarizer(provider: Arc<dyn ChatProvider>, max_summary_tokens: usize) -> Summarizer {
        Summarizer::new(
            provider,
            Arc::new(WordCounter),
            vec![ChatMessage::system("summarize")],
            max_summary_tokens,
            0.7,
        )
    }

    // ── Single-shot path ─────────────────────────────────────────────────

    #[tokio::test]
    async fn single_shot_joins_with_blank_line() {
        let provider = EchoProvider::new();
        let s = summarizer(provider.clone(), 100);
        let result = s.summarize(&[chunk("first part"), chunk("second part")]).await.unwrap();
        assert_eq!(result, "first part\n\nsecond part");
        assert_eq!(provider.calls().len(), 1);
    }

    #[tokio::test]
    async fn single_shot_passes_output_bound() {
        let provider = EchoProvider::new();
        let s = summarizer(provider.clone(), 42);
        let _ = s.summarize(&[chunk("text")]).await.unwrap();
        assert_eq!(provider.calls()[0].1, 42);
    }

    #[tokio::test]
    async fn empty_chunks_rejected() {
        let s = summarizer(EchoProvider::new(), 10);
        assert_matches!(s.summarize(&[]).await, Err(SummarizeError::EmptyInput));
        assert_matches!(
            s.summarize_reduced(&[]).await,
            Err(SummarizeError::EmptyInput)
        );
    }

    #[tokio::test]
    async fn provider_failure_propagates() {
        let s = summarizer(Arc::new(FailingProvider), 10);
        assert_matches!(
            s.summarize(&[chunk("x")]).await,
            Err(SummarizeError::Provider(_))
        );
        assert_matches!(
            s.summarize_reduced(&[chunk("x")]).await,
            Err(SummarizeError::Provider(_))
        );
    }

    // ── Input sizing ─────────────────────────────────────────────────────

    #[test]
    fn input_tokens_include_prompt_and_body() {
        let s = summarizer(EchoProvider::new(), 10);
        // prompt "summarize" = 1 token; body "a b\n\nc d" = 4 tokens
        let total = s.single_shot_input_tokens(&[chunk("a b"), chunk("c d")]);
        assert_eq!(total, 5);
    }

    // ── Recursive reduction ──────────────────────────────────────────────

    #[tokio::test]
    async fn eight_chunks_reduce_in_three_levels() {
        // Each chunk is one word (fits alone); jointly they exceed a 2-token
        // budget, so reduction runs 8 leaf calls, then 4 + 2 + 1 merges.
        let provider = EchoProvider::new();
        let s = summarizer(provider.clone(), 2);
        let chunks: Vec<TextChunk> = (1..=8).map(|i| chunk(&format!("c{i}"))).collect();

        let result = s.summarize_reduced(&chunks).await.unwrap();
        assert_eq!(result, "c1 c2 c3 c4 c5 c6 c7 c8");

        let inputs: Vec<String> = provider.calls().into_iter().map(|(c, _)| c).collect();
        assert_eq!(inputs.len(), 15, "8 leaves + 4 + 2 + 1 merges");
        // Leaves, in chunk order
        assert_eq!(
            &inputs[..8],
            &["c1", "c2", "c3", "c4", "c5", "c6", "c7", "c8"]
        );
        // Stable depth-first pairing: left half fully reduced before right
        assert_eq!(inputs[8], "c1 c2");
        assert_eq!(inputs[9], "c3 c4");
        assert_eq!(inputs[10], "c1 c2 c3 c4");
        assert_eq!(inputs[11], "c5 c6");
        assert_eq!(inputs[12], "c7 c8");
        assert_eq!(inputs[13], "c5 c6 c7 c8");
        assert_eq!(inputs[14], "c1 c2 c3 c4 c5 c6 c7 c8");
    }

    #[tokio::test]
    async fn small_input_reduces_with_one_final_merge() {
        // Two one-word summaries fit a 4-token budget: one request per leaf
        // plus a single final summarize.
        let provider = EchoProvider::new();
        let s = summarizer(provider.clone(), 4);
        let result = s
            .summarize_reduced(&[chunk("alpha"), chunk("beta")])
            .await
            .unwrap();
        assert_eq!(result, "alpha beta");
        assert_eq!(provider.calls().len(), 3);
    }

    #[tokio::test]
    async fn odd_chunk_count_reduces_without_hanging() {
        let provider = EchoProvider::new();
        let s = summarizer(provider.clone(), 1);
        let chunks: Vec<TextChunk> = (1..=3).map(|i| chunk(&format!("w{i}"))).collect();
        let result = s.summarize_reduced(&chunks).await.unwrap();
        assert_eq!(result, "w1 w2 w3");
    }

    #[tokio::test]
    async fn oversized_singleton_summary_not_split_further() {
        // A single leaf summary longer than the budget must terminate.
        let provider = EchoProvider::new();
        let s = summarizer(provider.clone(), 1);
        let result = s
            .summarize_reduced(&[chunk("many words in one chunk")])
            .await
            .unwrap();
        assert_eq!(result, "many words in one chunk");
        // One leaf call, one final summarize of the singleton
        assert_eq!(provider.calls().len(), 2);
    }
}
