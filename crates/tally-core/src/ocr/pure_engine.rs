//! Pure Rust OCR engine wrapper using `pure-onnx-ocr`.

use std::path::{Path, PathBuf};
use std::time::Instant;

use image::GenericImageView;
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::TallyConfig;

use super::{LanguageHint, RecognitionEngine, RecognitionSession};

/// Languages covered by the Latin-script recognition model.
const LATIN_LANGUAGES: &[&str] = &[
    "eng", "vie", "pol", "deu", "fra", "spa", "ita", "por", "nld", "ces", "ind", "tur",
];

/// OCR engine backed by `pure-onnx-ocr` (pure Rust, no external ONNX Runtime).
///
/// Models are loaded per session, so an idle engine holds no model memory.
pub struct PureOcrEngine {
    det_path: PathBuf,
    rec_path: PathBuf,
    dict_path: PathBuf,
    keep_unk: bool,
}

impl PureOcrEngine {
    /// Create an engine reading model files from `model_dir`.
    pub fn from_dir(model_dir: &Path, config: &TallyConfig) -> Result<Self, OcrError> {
        let det_path = model_dir.join(&config.models.detection_model);
        let rec_path = model_dir.join(&config.models.recognition_model);
        let dict_path = model_dir.join(&config.models.dictionary);

        for path in [&det_path, &rec_path, &dict_path] {
            if !path.exists() {
                return Err(OcrError::ModelLoad(format!(
                    "model file not found: {}",
                    path.display()
                )));
            }
        }

        info!("Using pure-onnx-ocr models from {}", model_dir.display());

        Ok(Self {
            det_path,
            rec_path,
            dict_path,
            keep_unk: config.ocr.keep_unk,
        })
    }
}

impl RecognitionEngine for PureOcrEngine {
    type Session = PureOcrSession;

    fn acquire(&self) -> Result<PureOcrSession, OcrError> {
        Ok(PureOcrSession {
            det_path: self.det_path.clone(),
            rec_path: self.rec_path.clone(),
            dict_path: self.dict_path.clone(),
            keep_unk: self.keep_unk,
            engine: None,
        })
    }
}

/// A loaded `pure-onnx-ocr` pipeline.
pub struct PureOcrSession {
    det_path: PathBuf,
    rec_path: PathBuf,
    dict_path: PathBuf,
    keep_unk: bool,
    engine: Option<pure_onnx_ocr::engine::OcrEngine>,
}

impl RecognitionSession for PureOcrSession {
    fn configure(&mut self, language: &LanguageHint) -> Result<(), OcrError> {
        if let Some(code) = language
            .codes()
            .iter()
            .find(|code| !LATIN_LANGUAGES.contains(&code.as_str()))
        {
            return Err(OcrError::UnsupportedLanguage(code.clone()));
        }

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&self.det_path)
            .rec_model_path(&self.rec_path)
            .dictionary_path(&self.dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        debug!("Loaded recognition models for {}", language);
        self.engine = Some(engine);
        Ok(())
    }

    fn recognize(&mut self, image: &[u8]) -> Result<String, OcrError> {
        let engine = self
            .engine
            .as_ref()
            .ok_or_else(|| OcrError::Recognition("session not configured".to_string()))?;

        let image = image::load_from_memory(image)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let start = Instant::now();
        let (width, height) = image.dimensions();
        info!("Processing image: {}x{}", width, height);

        let results = engine
            .run_from_image(&image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        let mut lines: Vec<(f32, f32, String)> = results
            .iter()
            .map(|r| {
                let (x, y) = top_left(&r.bounding_box);
                let text = if self.keep_unk {
                    r.text.clone()
                } else {
                    r.text.replace("[UNK]", " ")
                };
                (x, y, text)
            })
            .collect();

        // Reading order: rows of ~20px top to bottom, then left to right
        lines.sort_by(|a, b| {
            let row_a = (a.1 / 20.0) as i32;
            let row_b = (b.1 / 20.0) as i32;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        info!(
            "OCR complete: {} text regions in {}ms",
            lines.len(),
            start.elapsed().as_millis()
        );

        Ok(lines
            .into_iter()
            .map(|(_, _, text)| text)
            .collect::<Vec<_>>()
            .join("\n"))
    }

    fn release(&mut self) {
        if self.engine.take().is_some() {
            debug!("Unloaded recognition models");
        }
    }
}

/// Smallest x and y over the polygon's exterior points.
fn top_left(polygon: &pure_onnx_ocr::Polygon<f64>) -> (f32, f32) {
    polygon
        .exterior()
        .coords()
        .fold((f32::INFINITY, f32::INFINITY), |(x, y), c| {
            (x.min(c.x as f32), y.min(c.y as f32))
        })
}

/// Create an engine from model files in a directory.
pub fn create_engine_from_dir(
    model_dir: &Path,
    config: &TallyConfig,
) -> Result<PureOcrEngine, OcrError> {
    PureOcrEngine::from_dir(model_dir, config)
}
