//! Incomplete-input detection

use once_cell::sync::Lazy;
use regex::Regex;

static INCOMPLETE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[$%@#!]{1,2}$").expect("incomplete marker pattern is valid"));

/// True when the trimmed line is a one or two character marker prefix.
pub fn is_incomplete(line: &str) -> bool {
    INCOMPLETE_MARKER.is_match(line.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("$")]
    #[case("%")]
    #[case("@")]
    #[case("#")]
    #[case("!")]
    #[case("$$")]
    #[case("@#")]
    #[case("  % ")]
    fn test_truncated_markers_are_incomplete(#[case] line: &str) {
        assert!(is_incomplete(line));
    }

    #[rstest]
    #[case("")]
    #[case("$foo")]
    #[case("###")]
    #[case("# note")]
    #[case("/src")]
    fn test_other_lines_are_not_incomplete(#[case] line: &str) {
        assert!(!is_incomplete(line));
    }
}
