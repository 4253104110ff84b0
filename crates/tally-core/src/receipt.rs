//! Receipt scanning: recognition followed by amount detection.

use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::amount::AmountDetector;
use crate::error::{OcrError, Result};
use crate::models::config::TallyConfig;
use crate::models::detection::Detection;
use crate::ocr::{recognize_text, LanguageHint, RecognitionEngine};

/// Result of scanning one receipt image.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Text returned by the recognition engine.
    pub text: String,
    /// Detected amount, or nothing.
    pub detection: Detection,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Scans receipt images for their total amount.
pub struct ReceiptScanner<E> {
    engine: E,
    language: LanguageHint,
    detector: AmountDetector,
}

impl<E: RecognitionEngine> ReceiptScanner<E> {
    /// Create a scanner with the default `vie+eng` hint and default detector.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            language: LanguageHint::default(),
            detector: AmountDetector::new(),
        }
    }

    /// Create a scanner from configuration.
    pub fn from_config(engine: E, config: &TallyConfig) -> Result<Self> {
        Ok(Self {
            engine,
            language: config.ocr.language.parse()?,
            detector: AmountDetector::from_config(&config.detection),
        })
    }

    /// Set the language hint.
    pub fn with_language(mut self, language: LanguageHint) -> Self {
        self.language = language;
        self
    }

    /// Set the amount detector.
    pub fn with_detector(mut self, detector: AmountDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Recognize `image` and detect its amount.
    ///
    /// Only a recognition failure is an error. Text without a usable amount
    /// yields [`Detection::NothingDetected`].
    pub fn scan(&self, image: &[u8]) -> std::result::Result<ScanOutcome, OcrError> {
        let start = Instant::now();

        let text = recognize_text(&self.engine, image, &self.language)?;
        let detection = self.detector.detect(&text);

        let processing_time_ms = start.elapsed().as_millis() as u64;
        info!(
            "Scanned receipt in {}ms: {}",
            processing_time_ms,
            match &detection {
                Detection::Found(found) => found.display.as_str(),
                Detection::NothingDetected => "nothing detected",
            }
        );

        Ok(ScanOutcome {
            text,
            detection,
            processing_time_ms,
        })
    }

    /// Read an image file and scan it.
    pub fn scan_file(&self, path: &Path) -> Result<ScanOutcome> {
        let image = std::fs::read(path)?;
        debug!("Read {} bytes from {}", image.len(), path.display());
        Ok(self.scan(&image)?)
    }
}
