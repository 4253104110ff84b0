//! Result types for amount detection.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which extraction pattern produced a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenSource {
    /// Strict grouped-number pattern, always tried first.
    Primary,
    /// Loose digit-run pattern, only a recovery path.
    Fallback,
}

impl TokenSource {
    /// Lowercase tier name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            TokenSource::Primary => "primary",
            TokenSource::Fallback => "fallback",
        }
    }
}

/// Thousands separator used when formatting an amount for display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingStyle {
    /// `1.234.567` (Vietnamese, German).
    #[default]
    Dot,
    /// `1,234,567` (English).
    Comma,
    /// `1 234 567` (French, Polish).
    Space,
}

impl GroupingStyle {
    /// The separator character.
    pub fn separator(self) -> char {
        match self {
            GroupingStyle::Dot => '.',
            GroupingStyle::Comma => ',',
            GroupingStyle::Space => ' ',
        }
    }
}

/// A successfully detected amount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedAmount {
    /// Amount rounded to the nearest whole currency unit.
    pub amount: i64,

    /// Amount formatted for display (grouping and currency label applied).
    pub display: String,

    /// Value of the chosen candidate before rounding.
    pub raw_value: Decimal,

    /// Tier whose token produced the amount.
    pub source: TokenSource,

    /// Text of the token the amount came from.
    pub token: String,
}

/// Outcome of one detection run. Exactly one per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Detection {
    /// A plausible nonzero amount was found.
    Found(DetectedAmount),
    /// No nonzero candidate survived. Callers leave their state untouched.
    NothingDetected,
}

impl Detection {
    /// The detected amount, if any.
    pub fn amount(&self) -> Option<i64> {
        match self {
            Detection::Found(found) => Some(found.amount),
            Detection::NothingDetected => None,
        }
    }

    /// Whether anything was detected.
    pub fn is_found(&self) -> bool {
        matches!(self, Detection::Found(_))
    }

    /// Borrow the detected amount.
    pub fn found(&self) -> Option<&DetectedAmount> {
        match self {
            Detection::Found(found) => Some(found),
            Detection::NothingDetected => None,
        }
    }
}
