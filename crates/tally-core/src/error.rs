//! Error types for the tally-core library.
//!
//! Recognition, file access and configuration produce errors. The amount
//! pipeline itself reports "nothing detected" as a value, see [`crate::Detection`].

use thiserror::Error;

/// Main error type for the tally library.
#[derive(Error, Debug)]
pub enum TallyError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised by a text recognition engine.
///
/// Every variant is a recognition engine failure: when one of these is
/// returned the amount pipeline never ran.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The engine has no model for the requested language hint.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Image bytes could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Recognition finished but produced no text at all.
    #[error("no text recognized")]
    NoText,
}

/// Result type for the tally library.
pub type Result<T> = std::result::Result<T, TallyError>;
