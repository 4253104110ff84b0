//! Token cleaning.

/// Strip everything except digits and amount punctuation from a token.
///
/// Keeps ASCII digits, `.`, `,`, `(`, `)`, `-` and plain spaces. Any other
/// whitespace (non-breaking spaces, tabs, line breaks) becomes a plain space.
/// The result is trimmed. Cleaning a cleaned string returns it unchanged.
pub fn clean_token(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter_map(|c| match c {
            '0'..='9' | '.' | ',' | '(' | ')' | '-' | ' ' => Some(c),
            c if c.is_whitespace() => Some(' '),
            _ => None,
        })
        .collect();

    cleaned.trim().to_string()
}
