//! Amount detection over recognized receipt text.

use tracing::debug;

use super::report::{report, FormatOptions};
use super::select::{normalize, select_candidate, Candidate, FallbackPolicy};
use super::tokens::extract_tokens;
use crate::models::config::DetectionConfig;
use crate::models::detection::{Detection, GroupingStyle, TokenSource};

/// Detects the single most plausible amount in receipt text.
///
/// Selection takes the largest absolute value, on the assumption that the
/// total is the biggest number printed on a receipt.
#[derive(Debug, Clone, Default)]
pub struct AmountDetector {
    format: FormatOptions,
    fallback: FallbackPolicy,
}

impl AmountDetector {
    /// Create a detector with Vietnamese display formatting and fallback enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector from configuration.
    pub fn from_config(config: &DetectionConfig) -> Self {
        let fallback = if config.use_fallback {
            FallbackPolicy::WhenPrimaryEmpty
        } else {
            FallbackPolicy::Never
        };

        Self {
            format: FormatOptions {
                grouping: config.grouping,
                currency_label: config.currency_label.clone(),
            },
            fallback,
        }
    }

    /// Set the display grouping separator.
    pub fn with_grouping(mut self, grouping: GroupingStyle) -> Self {
        self.format.grouping = grouping;
        self
    }

    /// Set the display currency label.
    pub fn with_currency_label(mut self, label: impl Into<String>) -> Self {
        self.format.currency_label = label.into();
        self
    }

    /// Set when the fallback tier is consulted.
    pub fn with_fallback_policy(mut self, policy: FallbackPolicy) -> Self {
        self.fallback = policy;
        self
    }

    /// Display formatting in use.
    pub fn format_options(&self) -> &FormatOptions {
        &self.format
    }

    /// Detect the amount in `text`.
    pub fn detect(&self, text: &str) -> Detection {
        let detection = report(self.best_candidate(text), &self.format);

        match &detection {
            Detection::Found(found) => debug!(
                amount = found.amount,
                source = ?found.source,
                token = %found.token,
                "amount detected"
            ),
            Detection::NothingDetected => debug!("no amount detected"),
        }

        detection
    }

    /// The chosen candidate before rounding, if any.
    pub fn best_candidate<'a>(&self, text: &'a str) -> Option<Candidate<'a>> {
        let primary = select_candidate(self.candidates(text, TokenSource::Primary));

        self.fallback.resolve(primary, || {
            debug!("primary tier found no candidate, trying fallback");
            select_candidate(self.candidates(text, TokenSource::Fallback))
        })
    }

    /// Every parseable candidate of one tier, in text order. Zeros included.
    pub fn candidates<'a>(&self, text: &'a str, source: TokenSource) -> Vec<Candidate<'a>> {
        let tokens = extract_tokens(text, source);
        let candidates: Vec<_> = tokens.iter().filter_map(normalize).collect();

        debug!(
            source = ?source,
            tokens = tokens.len(),
            candidates = candidates.len(),
            "tier scanned"
        );

        candidates
    }
}

/// Detect the amount in `text` with default settings.
pub fn detect_amount(text: &str) -> Detection {
    AmountDetector::new().detect(text)
}

/// The primary bare-digit pattern matches every ASCII digit run, so a fallback
/// token holding a nonzero digit comes with a nonzero primary candidate built
/// from the same digits. Unless every such candidate is out of `i64` range,
/// `detect` returns a primary result and the fallback tier is never consulted.
/// The fallback path is therefore pinned through `FallbackPolicy` and
/// `candidates` rather than end to end.
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn amount(text: &str) -> Option<i64> {
        detect_amount(text).amount()
    }

    #[test]
    fn test_plain_digits() {
        assert_eq!(amount("50000"), Some(50000));
    }

    #[test]
    fn test_dot_grouped_thousands() {
        assert_eq!(amount("1.234.567"), Some(1234567));
    }

    #[test]
    fn test_comma_thousands_dot_decimal() {
        let detector = AmountDetector::new();
        let best = detector.best_candidate("1,234.56").unwrap();
        assert_eq!(best.value, Decimal::from_str("1234.56").unwrap());
        assert_eq!(amount("1,234.56"), Some(1235));
    }

    #[test]
    fn test_dot_thousands_comma_decimal() {
        assert_eq!(amount("1.234,56"), Some(1235));
    }

    #[test]
    fn test_negative_notations() {
        assert_eq!(amount("(150.000)"), Some(-150000));
        assert_eq!(amount("-150000"), Some(-150000));
    }

    #[test]
    fn test_dot_only_thousand() {
        assert_eq!(amount("1.000"), Some(1000));
    }

    #[test]
    fn test_all_zero_is_nothing() {
        assert_eq!(detect_amount("0 0.00"), Detection::NothingDetected);
        assert_eq!(detect_amount("Total: 0\nCash: 0.00"), Detection::NothingDetected);
    }

    #[test]
    fn test_picks_largest_magnitude() {
        let detection = detect_amount("Tổng: 150.000 Thuế: 15.000");
        let found = detection.found().unwrap();
        assert_eq!(found.amount, 150000);
        assert_eq!(found.token, "150.000");
        assert_eq!(found.display, "150.000 VNĐ");
    }

    #[test]
    fn test_malformed_input_is_nothing() {
        for text in ["abc", "", "....,,,", "   ", "₫đ--()"] {
            assert_eq!(detect_amount(text), Detection::NothingDetected, "input {:?}", text);
        }
    }

    #[test]
    fn test_space_grouped_total_from_primary() {
        let detection = detect_amount("Total  12 345");
        let found = detection.found().unwrap();
        assert_eq!(found.amount, 12345);
        assert_eq!(found.source, TokenSource::Primary);
    }

    #[test]
    fn test_fallback_not_used_when_primary_has_result() {
        let detector = AmountDetector::new();
        let best = detector.best_candidate("Total  12  34 5").unwrap();
        assert_eq!(best.source, TokenSource::Primary);
        assert_eq!(best.value, Decimal::from(34));

        let fallback = select_candidate(detector.candidates("Total  12  34 5", TokenSource::Fallback));
        assert_eq!(fallback.unwrap().value, Decimal::from(12345));
    }

    #[test]
    fn test_fallback_policy_never() {
        let detector = AmountDetector::new().with_fallback_policy(FallbackPolicy::Never);
        assert_eq!(detector.detect("0.00"), Detection::NothingDetected);
        assert_eq!(detector.detect("12.345"), detect_amount("12.345"));
    }

    #[test]
    fn test_largest_number_wins_over_total_line() {
        let text = "CỬA HÀNG TIỆN LỢI\n\
                    Ngày: 12/03/2024 14:35\n\
                    Bánh mì      2 x 15.000   30.000\n\
                    Cà phê sữa   1 x 25.000   25.000\n\
                    Giảm giá                 (5.000)\n\
                    TỔNG CỘNG:               50.000\n\
                    Tiền mặt:               100.000\n\
                    Tiền thối:               50.000";
        assert_eq!(amount(text), Some(100000));
    }

    #[test]
    fn test_long_fraction_is_not_grouping() {
        let detector = AmountDetector::new();
        assert_eq!(
            detector.best_candidate("Ty gia 3.14159").unwrap().value,
            Decimal::from_str("3.14159").unwrap()
        );
        assert_eq!(amount("Ty gia 3.14159"), Some(3));
        assert_eq!(amount("Can nang 1.5000 kg"), Some(2));
    }

    #[test]
    fn test_total_does_not_merge_with_next_line() {
        assert_eq!(amount("Tong cong: 150.000\n200 Nguyen Hue"), Some(150000));
        assert_eq!(amount("Tong cong: 150.000\r\n200 Nguyen Hue"), Some(150000));
    }

    #[test]
    fn test_oversized_ids_do_not_hide_total() {
        assert_eq!(amount("Ma GD: 12345678901234567890 Tong: 150.000"), Some(150000));
        assert_eq!(
            amount("Ma GD: 123456789012345678901234567890 Tong: 150.000"),
            Some(150000)
        );
        assert_eq!(detect_amount("12345678901234567890"), Detection::NothingDetected);
    }

    #[test]
    fn test_nbsp_grouping() {
        assert_eq!(amount("Razem:\u{00a0}1\u{00a0}234,56\u{00a0}zł"), Some(1235));
    }

    #[test]
    fn test_display_options() {
        let detector = AmountDetector::new()
            .with_grouping(GroupingStyle::Space)
            .with_currency_label("");
        let detection = detector.detect("Total 1,234,567.00");
        assert_eq!(detection.found().unwrap().display, "1 234 567");
    }

    #[test]
    fn test_from_config() {
        let config = DetectionConfig {
            grouping: GroupingStyle::Comma,
            currency_label: "USD".to_string(),
            use_fallback: false,
        };
        let detector = AmountDetector::from_config(&config);
        assert_eq!(detector.format_options().grouping, GroupingStyle::Comma);
        assert_eq!(
            detector.detect("Total 1.234,56").found().unwrap().display,
            "1,235 USD"
        );
    }
}
