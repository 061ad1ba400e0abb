//! Final summary artifact and transport-size part splitting.

use kaiji_core::text::truncate_chars;

/// A completed document summary, ready for storage or notification.
///
/// When the text exceeds a transport ceiling it is split into ordered parts;
/// each part is independently an emittable artifact.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SummaryResult {
    /// The full summary text.
    pub text: String,
}

impl SummaryResult {
    /// Wrap a summary text.
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { text }
    }

    /// Split into parts of at most `max_chars` characters each.
    ///
    /// A summary within the ceiling yields a single part. Splits are
    /// character-counted (never inside a multi-byte character) and preserve
    /// order; concatenating the parts reproduces the text exactly. A ceiling
    /// of zero is treated as one.
    #[must_use]
    pub fn into_parts(self, max_chars: usize) -> Vec<String> {
        let max_chars = max_chars.max(1);
        if self.text.chars().count() <= max_chars {
            return vec![self.text];
        }

        let mut parts = Vec::new();
        let mut rest = self.text.as_str();
        while !rest.is_empty() {
            let part = truncate_chars(rest, max_chars);
            parts.push(part.to_owned());
            rest = &rest[part.len()..];
        }
        parts
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
