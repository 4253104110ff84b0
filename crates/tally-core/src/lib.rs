//! Core library for receipt amount detection.
//!
//! This crate provides:
//! - Amount detection from recognized receipt text (token extraction,
//!   sign handling, `.`/`,` disambiguation, candidate selection)
//! - A scoped text recognition boundary with a `pure-onnx-ocr` backend
//! - Receipt scanning that ties the two together

pub mod amount;
pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use amount::{detect_amount, AmountDetector, FallbackPolicy};
pub use error::{OcrError, Result, TallyError};
pub use models::config::TallyConfig;
pub use models::detection::{DetectedAmount, Detection, GroupingStyle, TokenSource};
pub use ocr::{recognize_text, LanguageHint, RecognitionEngine, RecognitionSession, SessionGuard};
pub use receipt::{ReceiptScanner, ScanOutcome};

#[cfg(feature = "native")]
pub use ocr::{create_engine_from_dir, PureOcrEngine};
