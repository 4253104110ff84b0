//! Amount detection from recognized receipt text.
//!
//! Text is scanned for numeric tokens with a strict pattern first. Each token
//! is cleaned, its sign resolved and its separators disambiguated; the largest
//! nonzero candidate wins. A looser pattern is tried only when the strict one
//! leaves nothing.

mod clean;
mod detector;
mod locale;
pub mod patterns;
mod report;
mod select;
mod sign;
mod tokens;

pub use clean::clean_token;
pub use detector::{detect_amount, AmountDetector};
pub use locale::disambiguate;
pub use report::{format_amount, report, round_amount, FormatOptions};
pub use select::{normalize, select_candidate, Candidate, FallbackPolicy};
pub use sign::{resolve_sign, Signed};
pub use tokens::{extract_tokens, Token};
