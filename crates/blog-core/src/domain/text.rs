//! Text helpers shared by the read views.

/// Number of words shown in a post preview on the list page.
pub const PREVIEW_WORDS: usize = 30;

/// Appended to a preview that was cut short.
pub const TRUNCATION_MARKER: &str = " …";

/// Keep the first `max_words` whitespace-separated words of `text`.
///
/// Runs of whitespace collapse to a single space. When words were dropped the
/// result ends with [`TRUNCATION_MARKER`].
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let mut words = text.split_whitespace();
    let kept: Vec<&str> = words.by_ref().take(max_words).collect();
    let mut preview = kept.join(" ");
    if words.next().is_some() {
        preview.push_str(TRUNCATION_MARKER);
    }
    preview
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_untouched() {
        assert_eq!(truncate_words("hello  world", 30), "hello world");
    }

    #[test]
    fn test_exact_length_has_no_marker() {
        assert_eq!(truncate_words("a b c", 3), "a b c");
    }

    #[test]
    fn test_long_text_is_cut_with_marker() {
        let text = "world ".repeat(40);
        let preview = truncate_words(&text, PREVIEW_WORDS);
        assert!(preview.ends_with(TRUNCATION_MARKER));
        let body = preview.trim_end_matches(TRUNCATION_MARKER);
        assert_eq!(body.split(' ').count(), PREVIEW_WORDS);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(truncate_words("", 5), "");
        assert_eq!(truncate_words("a b", 0), " …");
    }
}
