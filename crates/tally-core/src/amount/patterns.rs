//! Regex patterns for numeric token extraction.
//!
//! A tier may have several patterns. At each scan position the match that
//! starts first wins, and among matches starting at the same byte the longest.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    pub static ref PRIMARY_PATTERNS: [Regex; 2] = [
        // Grouped numbers: "1.234.567", "1,234.56", "(150.000)", "12 345,5".
        // Groups are split by '.', ',' or a horizontal space, never a line break.
        Regex::new(
            r"\(?-?[0-9]{1,3}(?:[.,\x20\x{00A0}\x{202F}][0-9]{3})+(?:[.,][0-9]{1,2})?\)?"
        ).unwrap(),
        // Bare digit run with an optional fraction: "50000", "-150000", "3.14159".
        Regex::new(r"-?[0-9]+(?:[.,][0-9]+)?").unwrap(),
    ];

    // At least four characters of digits, whitespace, '.' and ',' with a digit at both ends.
    pub static ref FALLBACK_PATTERNS: [Regex; 1] = [
        Regex::new(r"[0-9][0-9\s.,]{2,}[0-9]").unwrap(),
    ];
}
