//! Numeric token extraction.

use regex::{Match, Regex};

use super::patterns::{FALLBACK_PATTERNS, PRIMARY_PATTERNS};
use crate::models::detection::TokenSource;

/// A numeric-looking substring of the recognized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Matched text, uncleaned.
    pub text: &'a str,
    /// Pattern tier that produced the match.
    pub source: TokenSource,
    /// Byte offset of the match start.
    pub start: usize,
    /// Byte offset one past the match end.
    pub end: usize,
}

impl TokenSource {
    /// Extraction patterns for this tier.
    pub fn patterns(self) -> &'static [Regex] {
        match self {
            TokenSource::Primary => PRIMARY_PATTERNS.as_slice(),
            TokenSource::Fallback => FALLBACK_PATTERNS.as_slice(),
        }
    }
}

/// Scan `text` left to right for non-overlapping tokens of the given tier.
///
/// Leftmost-longest: the earliest match of any tier pattern wins, and of
/// matches starting at the same byte the longest one.
pub fn extract_tokens(text: &str, source: TokenSource) -> Vec<Token<'_>> {
    let patterns = source.patterns();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while let Some(m) = leftmost_longest(patterns, text, pos) {
        tokens.push(Token {
            text: m.as_str(),
            source,
            start: m.start(),
            end: m.end(),
        });
        pos = m.end();
    }

    tokens
}

fn leftmost_longest<'t>(patterns: &[Regex], text: &'t str, pos: usize) -> Option<Match<'t>> {
    patterns
        .iter()
        .filter_map(|p| p.find_at(text, pos))
        .filter(|m| !m.is_empty())
        .reduce(|best, m| {
            if m.start() < best.start() || (m.start() == best.start() && m.end() > best.end()) {
                m
            } else {
                best
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn texts(text: &str, source: TokenSource) -> Vec<&str> {
        extract_tokens(text, source).iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_primary_grouped_and_bare() {
        assert_eq!(
            texts("Tổng: 150.000 Thuế: 15.000", TokenSource::Primary),
            vec!["150.000", "15.000"]
        );
        assert_eq!(texts("Total 50000 VND", TokenSource::Primary), vec!["50000"]);
        assert_eq!(
            texts("Sum 1,234.56 / 1.234,56", TokenSource::Primary),
            vec!["1,234.56", "1.234,56"]
        );
    }

    #[test]
    fn test_primary_keeps_sign_notation() {
        assert_eq!(texts("Refund (150.000)", TokenSource::Primary), vec!["(150.000)"]);
        assert_eq!(texts("Refund -150000", TokenSource::Primary), vec!["-150000"]);
    }

    #[test]
    fn test_primary_space_grouping() {
        assert_eq!(texts("Total  12 345", TokenSource::Primary), vec!["12 345"]);
        assert_eq!(
            texts("Razem 1\u{00a0}234,56", TokenSource::Primary),
            vec!["1\u{00a0}234,56"]
        );
    }

    #[test]
    fn test_primary_longest_match_wins() {
        assert_eq!(texts("Ty gia 3.14159", TokenSource::Primary), vec!["3.14159"]);
        assert_eq!(texts("Can nang 1.5000 kg", TokenSource::Primary), vec!["1.5000"]);
        assert_eq!(texts("1.234.567 / 1234", TokenSource::Primary), vec!["1.234.567", "1234"]);
    }

    #[test]
    fn test_primary_groups_stop_at_line_break() {
        assert_eq!(
            texts("Tong cong: 150.000\n200 Nguyen Hue", TokenSource::Primary),
            vec!["150.000", "200"]
        );
        assert_eq!(texts("12\t345", TokenSource::Primary), vec!["12", "345"]);
        assert_eq!(texts("12\u{202f}345", TokenSource::Primary), vec!["12\u{202f}345"]);
    }

    #[test]
    fn test_fallback_spans_irregular_spacing() {
        assert_eq!(texts("Total  12  34 5", TokenSource::Fallback), vec!["12  34 5"]);
        assert_eq!(texts("x 12 y", TokenSource::Fallback), Vec::<&str>::new());
        assert_eq!(texts("a 1.5 b", TokenSource::Fallback), Vec::<&str>::new());
    }

    #[test]
    fn test_token_spans_and_source() {
        let tokens = extract_tokens("ab 42", TokenSource::Primary);
        assert_eq!(tokens.len(), 1);
        assert_eq!((tokens[0].start, tokens[0].end), (3, 5));
        assert_eq!(tokens[0].source, TokenSource::Primary);
    }

    #[test]
    fn test_no_tokens() {
        assert!(extract_tokens("", TokenSource::Primary).is_empty());
        assert!(extract_tokens("abc", TokenSource::Fallback).is_empty());
    }
}
