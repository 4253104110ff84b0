//! WASM bindings for receipt amount detection.
//!
//! Recognition runs in the browser (any OCR library); the recognized text is
//! handed to these bindings to pick the amount for the transaction form.

use rust_decimal::prelude::ToPrimitive;
use wasm_bindgen::prelude::*;

use tally_core::amount::{self, FallbackPolicy};
use tally_core::models::detection::{Detection, GroupingStyle, TokenSource};

/// Initialize panic hook for better error messages in console.
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Version information.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Detect the amount in recognized receipt text.
///
/// Returns `{ status: "found", amount, display, raw_value, source, token }`
/// or `{ status: "nothing_detected" }`.
#[wasm_bindgen(js_name = detectAmount)]
pub fn detect_amount(text: &str) -> Result<JsValue, JsValue> {
    to_js(&tally_core::detect_amount(text))
}

/// Parse one token (e.g. "(1.234,56)") to a signed number, or `undefined`.
#[wasm_bindgen(js_name = normalizeToken)]
pub fn normalize_token(token: &str) -> Option<f64> {
    let token = amount::Token {
        text: token,
        source: TokenSource::Primary,
        start: 0,
        end: token.len(),
    };
    amount::normalize(&token).and_then(|c| c.value.to_f64())
}

/// Format a whole amount with thousands grouping ("dot", "comma" or "space").
#[wasm_bindgen(js_name = formatAmount)]
pub fn format_amount(value: f64, grouping: &str) -> Result<String, JsValue> {
    if !value.is_finite() {
        return Err(JsValue::from_str("amount must be finite"));
    }
    Ok(amount::format_amount(value.round() as i64, parse_grouping(grouping)?))
}

/// Amount detector class for browser use.
#[wasm_bindgen]
pub struct AmountDetector {
    inner: amount::AmountDetector,
}

#[wasm_bindgen]
impl AmountDetector {
    /// Create a detector with `1.234.567 VNĐ` display formatting.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: amount::AmountDetector::new(),
        }
    }

    /// Set the display grouping: "dot", "comma" or "space".
    #[wasm_bindgen(js_name = setGrouping)]
    pub fn set_grouping(&mut self, grouping: &str) -> Result<(), JsValue> {
        let grouping = parse_grouping(grouping)?;
        self.inner = self.inner.clone().with_grouping(grouping);
        Ok(())
    }

    /// Set the display currency label. Empty to omit.
    #[wasm_bindgen(js_name = setCurrencyLabel)]
    pub fn set_currency_label(&mut self, label: &str) {
        self.inner = self.inner.clone().with_currency_label(label);
    }

    /// Enable or disable the fallback token pattern.
    #[wasm_bindgen(js_name = setFallback)]
    pub fn set_fallback(&mut self, enabled: bool) {
        let policy = if enabled {
            FallbackPolicy::WhenPrimaryEmpty
        } else {
            FallbackPolicy::Never
        };
        self.inner = self.inner.clone().with_fallback_policy(policy);
    }

    /// Detect the amount, returning the full result object.
    #[wasm_bindgen]
    pub fn detect(&self, text: &str) -> Result<JsValue, JsValue> {
        to_js(&self.inner.detect(text))
    }

    /// Detect the amount, returning only the whole number or `undefined`.
    #[wasm_bindgen(js_name = detectValue)]
    pub fn detect_value(&self, text: &str) -> Option<f64> {
        self.inner.detect(text).amount().map(|a| a as f64)
    }
}

impl Default for AmountDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_grouping(grouping: &str) -> Result<GroupingStyle, JsValue> {
    match grouping.to_ascii_lowercase().as_str() {
        "dot" | "." => Ok(GroupingStyle::Dot),
        "comma" | "," => Ok(GroupingStyle::Comma),
        "space" | " " => Ok(GroupingStyle::Space),
        other => Err(JsValue::from_str(&format!("unknown grouping: {}", other))),
    }
}

fn to_js(detection: &Detection) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(detection).map_err(|e| JsValue::from_str(&e.to_string()))
}
