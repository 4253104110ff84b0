//! Token normalization and candidate selection.

use rust_decimal::Decimal;
use tracing::trace;

use super::clean::clean_token;
use super::locale::disambiguate;
use super::report::round_amount;
use super::sign::resolve_sign;
use super::tokens::Token;
use crate::models::detection::TokenSource;

/// A signed amount parsed from one token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate<'a> {
    /// Signed value.
    pub value: Decimal,
    /// Token text the value was parsed from.
    pub token: &'a str,
    /// Tier that produced the token.
    pub source: TokenSource,
}

/// Run the clean, sign and locale steps over one token.
///
/// Returns `None` for tokens that cannot be read as a number, or whose value
/// does not fit a whole-unit `i64` amount (long transaction or barcode IDs).
/// The same chain serves both tiers; the tier only travels along as a tag.
pub fn normalize<'a>(token: &Token<'a>) -> Option<Candidate<'a>> {
    let cleaned = clean_token(token.text);
    let signed = resolve_sign(&cleaned);

    let Some(magnitude) = disambiguate(&signed.unsigned) else {
        trace!(token = token.text, source = ?token.source, "unparseable token");
        return None;
    };

    let value = if signed.negative { -magnitude } else { magnitude };

    if round_amount(value).is_none() {
        trace!(token = token.text, source = ?token.source, "token out of amount range");
        return None;
    }

    Some(Candidate {
        value,
        token: token.text,
        source: token.source,
    })
}

/// Pick the candidate with the greatest absolute value, skipping zeros.
///
/// The first of several equally large candidates wins.
pub fn select_candidate<'a, I>(candidates: I) -> Option<Candidate<'a>>
where
    I: IntoIterator<Item = Candidate<'a>>,
{
    candidates
        .into_iter()
        .filter(|c| !c.value.is_zero())
        .fold(None, |best: Option<Candidate<'a>>, c| match best {
            Some(b) if b.value.abs() >= c.value.abs() => Some(b),
            _ => Some(c),
        })
}

/// When the fallback tier may be consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FallbackPolicy {
    /// Only when the primary tier produced zero surviving candidates.
    #[default]
    WhenPrimaryEmpty,
    /// Never; the primary tier alone decides.
    Never,
}

impl FallbackPolicy {
    /// Whether the fallback tier should run given the primary tier's choice.
    ///
    /// A primary result is never overridden.
    pub fn should_consult_fallback(self, primary: Option<&Candidate<'_>>) -> bool {
        match self {
            FallbackPolicy::WhenPrimaryEmpty => primary.is_none(),
            FallbackPolicy::Never => false,
        }
    }

    /// Combine the tiers. The fallback closure runs only when the policy allows it.
    pub fn resolve<'a, F>(self, primary: Option<Candidate<'a>>, fallback: F) -> Option<Candidate<'a>>
    where
        F: FnOnce() -> Option<Candidate<'a>>,
    {
        if self.should_consult_fallback(primary.as_ref()) {
            fallback()
        } else {
            primary
        }
    }
}
