//! Descriptive-text normalization.

use std::sync::LazyLock;

use regex::Regex;

/// Default maximum description length in characters.
pub const DEFAULT_MAX_LEN: usize = 280;

/// Appended when a description is truncated.
pub const TRUNCATION_MARKER: char = '…';

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Collapse whitespace and bound the length of descriptive text.
///
/// Runs of whitespace (including newlines and tabs) collapse to a single
/// space and the result is trimmed. If the collapsed text exceeds
/// `max_len` characters it is cut to `max_len - 1` characters and
/// [`TRUNCATION_MARKER`] is appended, so the result is exactly `max_len`
/// characters long. Lengths are counted in characters, not bytes.
///
/// Pure and idempotent on already-normalized input within the bound.
pub fn compact(text: &str, max_len: usize) -> String {
    let collapsed = WHITESPACE_RE.replace_all(text, " ");
    let collapsed = collapsed.trim();

    if collapsed.chars().count() <= max_len {
        return collapsed.to_string();
    }

    let mut truncated: String = collapsed.chars().take(max_len.saturating_sub(1)).collect();
    truncated.push(TRUNCATION_MARKER);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(compact("hello   world", DEFAULT_MAX_LEN), "hello world");
        assert_eq!(compact("a\n\tb \r\n c", DEFAULT_MAX_LEN), "a b c");
    }

    #[test]
    fn trims_leading_and_trailing() {
        assert_eq!(compact("  padded  ", DEFAULT_MAX_LEN), "padded");
    }

    #[test]
    fn empty_input_yields_empty() {
        assert_eq!(compact("", DEFAULT_MAX_LEN), "");
        assert_eq!(compact("   \n\t ", DEFAULT_MAX_LEN), "");
    }

    #[test]
    fn truncates_to_exact_length() {
        let result = compact("this text is definitely too long", 10);
        assert_eq!(result.chars().count(), 10);
        assert!(result.ends_with(TRUNCATION_MARKER));
        assert_eq!(result, "this text…");
    }

    #[test]
    fn within_bound_left_untouched() {
        assert_eq!(compact("exactly ten", 11), "exactly ten");
    }

    #[test]
    fn idempotent_on_normalized_input() {
        let once = compact("some \n messy \t input that goes on", 20);
        let twice = compact(&once, 20);
        assert_eq!(once, twice);
    }

    #[test]
    fn counts_characters_not_bytes() {
        // Multibyte characters still produce an exact character-count bound.
        let result = compact("日本語のテキストがここにあります", 5);
        assert_eq!(result.chars().count(), 5);
        assert!(result.ends_with(TRUNCATION_MARKER));
    }
}
