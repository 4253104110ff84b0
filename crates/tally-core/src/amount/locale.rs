//! Decimal marker / thousands separator disambiguation.
//!
//! Receipts mix conventions: Vietnamese and German print `1.234,56`, English
//! prints `1,234.56`, French and Polish print `1 234,56`. The separator nearest
//! the fraction decides. When a single kind of mark is present, exactly three
//! trailing digits mean grouping, so `1.000` and `1,000` are both one thousand.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse an unsigned token (digits, `.`, `,` and spaces) into a non-negative decimal.
///
/// Returns `None` when the token cannot be read as a number.
pub fn disambiguate(unsigned: &str) -> Option<Decimal> {
    let compact: String = unsigned.chars().filter(|c| !c.is_whitespace()).collect();

    if !compact.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match (compact.rfind('.'), compact.rfind(',')) {
        (Some(dot), Some(comma)) if dot > comma => compact.replace(',', ""),
        (Some(_), Some(_)) => compact.replace('.', "").replace(',', "."),
        (None, Some(_)) => resolve_single_mark(&compact, ','),
        (Some(_), None) => resolve_single_mark(&compact, '.'),
        (None, None) => compact,
    };

    let value = Decimal::from_str(&normalized).ok()?;
    (!value.is_sign_negative()).then_some(value)
}

/// Only one kind of separator is present: grouping when exactly three digits
/// follow its last occurrence, otherwise the last occurrence is the decimal marker.
fn resolve_single_mark(compact: &str, mark: char) -> String {
    let Some(last) = compact.rfind(mark) else {
        return compact.to_string();
    };

    let (head, tail) = compact.split_at(last);
    let fraction = &tail[mark.len_utf8()..];

    if fraction.len() == 3 && fraction.chars().all(|c| c.is_ascii_digit()) {
        compact.replace(mark, "")
    } else {
        format!("{}.{}", head.replace(mark, ""), fraction)
    }
}
