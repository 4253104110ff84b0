//! Rounding and display formatting of the chosen amount.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::select::Candidate;
use crate::models::detection::{DetectedAmount, Detection, GroupingStyle};

/// How a detected amount is rendered for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    /// Thousands separator.
    pub grouping: GroupingStyle,
    /// Suffix such as "VNĐ". Empty to omit.
    pub currency_label: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            grouping: GroupingStyle::Dot,
            currency_label: "VNĐ".to_string(),
        }
    }
}

/// Round to the nearest whole currency unit, halves away from zero.
///
/// Returns `None` when the rounded value does not fit in an `i64`.
pub fn round_amount(value: Decimal) -> Option<i64> {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Format a whole amount with thousands grouping (`1234567` -> `1.234.567`).
pub fn format_amount(amount: i64, grouping: GroupingStyle) -> String {
    let digits: Vec<char> = amount.unsigned_abs().to_string().chars().collect();
    let separator = grouping.separator();

    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        formatted.push('-');
    }

    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            formatted.push(separator);
        }
        formatted.push(*c);
    }

    formatted
}

/// Turn the selected candidate into the caller-facing outcome.
pub fn report(candidate: Option<Candidate<'_>>, options: &FormatOptions) -> Detection {
    let Some(candidate) = candidate else {
        return Detection::NothingDetected;
    };

    let amount = match round_amount(candidate.value) {
        Some(amount) if amount != 0 => amount,
        _ => return Detection::NothingDetected,
    };

    let mut display = format_amount(amount, options.grouping);
    if !options.currency_label.is_empty() {
        display.push(' ');
        display.push_str(&options.currency_label);
    }

    Detection::Found(DetectedAmount {
        amount,
        display,
        raw_value: candidate.value,
        source: candidate.source,
        token: candidate.token.to_string(),
    })
}
