//! Accounting-negative notation.

/// A cleaned token split into its sign and unsigned body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signed {
    /// Token was written as a negative amount.
    pub negative: bool,
    /// Token with `(`, `)` and `-` removed.
    pub unsigned: String,
}

/// Detect `(150.000)` or `-150000` style negatives.
///
/// Both notations mean the same thing; a token using both is still just negative.
pub fn resolve_sign(cleaned: &str) -> Signed {
    let parenthesized = cleaned.len() >= 2 && cleaned.starts_with('(') && cleaned.ends_with(')');
    let negative = parenthesized || cleaned.contains('-');

    let unsigned = cleaned
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '-'))
        .collect();

    Signed { negative, unsigned }
}
