//! UTF-8-safe text helpers shared across the pipeline.
//!
//! Filings mix ASCII and multi-byte Japanese text, so every cut point here is
//! computed in characters, never raw byte offsets.

/// The longest prefix of `s` containing at most `max_chars` characters.
#[must_use]
pub fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

/// Short log-friendly preview of `s`: at most `max_chars` characters, with an
/// ellipsis appended when truncated.
#[must_use]
pub fn preview(s: &str, max_chars: usize) -> String {
    let prefix = truncate_chars(s, max_chars);
    if prefix.len() == s.len() {
        prefix.to_owned()
    } else {
        format!("{prefix}…")
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── truncate_chars ───────────────────────────────────────────────────

    #[test]
    fn ascii_within_limit() {
        assert_eq!(truncate_chars("hello", 10), "hello");
    }

    #[test]
    fn ascii_truncated() {
        assert_eq!(truncate_chars("hello world", 5), "hello");
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Each kana is 3 bytes but 1 character
        assert_eq!(truncate_chars("有価証券報告書", 4), "有価証券");
    }

    #[test]
    fn zero_max_is_empty() {
        assert_eq!(truncate_chars("依頼", 0), "");
    }

    // ── preview ──────────────────────────────────────────────────────────

    #[test]
    fn preview_short_text_unchanged() {
        assert_eq!(preview("summary", 100), "summary");
    }

    #[test]
    fn preview_appends_ellipsis() {
        assert_eq!(preview("hello world", 5), "hello…");
    }

    #[test]
    fn preview_exact_length_no_ellipsis() {
        assert_eq!(preview("hello", 5), "hello");
    }
}
