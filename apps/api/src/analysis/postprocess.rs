//! Post-processing for the rewrite workflow: deterministic cleanup of LLM
//! output that should be plain text but may echo markdown syntax.

use once_cell::sync::Lazy;
use regex::Regex;

/// One to three asterisks bounded by whitespace or a string edge — stray
/// emphasis markers, not asterisks attached to a word.
static RE_EMPHASIS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(^|\s)\*{1,3}(\s|$)").unwrap());

/// Strips stray markdown emphasis markers, replacing each (with its bounding
/// whitespace) by a single space. Runs to a fixpoint: adjacent markers such
/// as `* *` leave a new whitespace-bounded run behind after one pass, and a
/// stripped text must strip to itself.
pub fn strip_emphasis_markers(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = RE_EMPHASIS.replace_all(&current, " ").to_string();
        if next == current {
            return next;
        }
        current = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_asterisk() {
        assert_eq!(strip_emphasis_markers("skills * rust"), "skills rust");
    }

    #[test]
    fn test_strips_double_and_triple_asterisks() {
        assert_eq!(strip_emphasis_markers("a ** b"), "a b");
        assert_eq!(strip_emphasis_markers("a *** b"), "a b");
    }

    #[test]
    fn test_strips_marker_at_string_edges() {
        assert_eq!(strip_emphasis_markers("* leading"), " leading");
        assert_eq!(strip_emphasis_markers("trailing *"), "trailing ");
    }

    #[test]
    fn test_keeps_asterisks_attached_to_words() {
        // `**bold**` is not whitespace-bounded, so it survives.
        assert_eq!(strip_emphasis_markers("**bold** text"), "**bold** text");
    }

    #[test]
    fn test_four_or_more_asterisks_survive() {
        assert_eq!(strip_emphasis_markers("a **** b"), "a **** b");
    }

    #[test]
    fn test_adjacent_markers_all_removed() {
        // One regex pass leaves `a * b` behind; the fixpoint loop does not.
        assert_eq!(strip_emphasis_markers("a * * b"), "a b");
    }

    #[test]
    fn test_idempotent_on_clean_text() {
        let clean = "Senior engineer with 8 years of Rust experience.";
        assert_eq!(strip_emphasis_markers(clean), clean);
    }

    #[test]
    fn test_stripping_is_idempotent() {
        for input in [
            "a * b ** c *** d",
            "* start and end *",
            "a * * b",
            "no markers here",
        ] {
            let once = strip_emphasis_markers(input);
            let twice = strip_emphasis_markers(&once);
            assert_eq!(once, twice, "not idempotent for {input:?}");
        }
    }
}
