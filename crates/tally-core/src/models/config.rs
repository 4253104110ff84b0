//! Configuration structures for receipt scanning.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::detection::GroupingStyle;
use crate::error::{Result, TallyError};

/// Main configuration for the tally pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Model configuration.
    pub models: ModelConfig,

    /// Amount detection configuration.
    pub detection: DetectionConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Language hint handed to the engine, `+`-separated (e.g. "vie+eng").
    pub language: String,

    /// Keep `[UNK]` markers emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            language: "vie+eng".to_string(),
            keep_unk: false,
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Latin-script recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

/// Amount detection and reporting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectionConfig {
    /// Thousands separator used in the display string.
    pub grouping: GroupingStyle,

    /// Currency label appended to the display string. Empty to omit.
    pub currency_label: String,

    /// Consult the looser fallback token pattern when the primary one finds nothing.
    pub use_fallback: bool,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            grouping: GroupingStyle::Dot,
            currency_label: "VNĐ".to_string(),
            use_fallback: true,
        }
    }
}

impl TallyConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| TallyError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TallyError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
