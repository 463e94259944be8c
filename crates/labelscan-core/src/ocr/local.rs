//! Local OCR engine wrapper using `pure-onnx-ocr`.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use tracing::{debug, info};

use crate::error::OcrError;

use super::OcrEngine;

/// On-device OCR backed by `pure-onnx-ocr` (pure Rust, no external
/// ONNX Runtime).
pub struct PureOcrEngine {
    engine: pure_onnx_ocr::engine::OcrEngine,
}

impl PureOcrEngine {
    /// Create an engine from model files in a directory. Expects
    /// `det.onnx`, `rec.onnx` and `dict.txt` inside `model_dir`.
    pub fn from_dir(model_dir: &Path) -> Result<Self, OcrError> {
        let det_path = model_dir.join("det.onnx");
        let rec_path = model_dir.join("rec.onnx");
        let dict_path = model_dir.join("dict.txt");

        let engine = pure_onnx_ocr::engine::OcrEngineBuilder::new()
            .det_model_path(&det_path)
            .rec_model_path(&rec_path)
            .dictionary_path(&dict_path)
            .build()
            .map_err(|e| OcrError::ModelLoad(format!("pure-onnx-ocr: {}", e)))?;

        info!("loaded pure-onnx-ocr engine from {}", model_dir.display());

        Ok(Self { engine })
    }
}

impl OcrEngine for PureOcrEngine {
    fn name(&self) -> &'static str {
        "pure-onnx-ocr"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();

        let results = self
            .engine
            .run_from_image(image)
            .map_err(|e| OcrError::Recognition(format!("pure-onnx-ocr: {}", e)))?;

        debug!("pure-onnx-ocr returned {} text regions", results.len());

        // Sort regions into reading order before joining, grouping rows
        // by approximate vertical position.
        let mut lines: Vec<(f64, f64, String)> = results
            .iter()
            .map(|r| {
                let (y, x) = r
                    .bounding_box
                    .exterior()
                    .coords()
                    .next()
                    .map(|c| (c.y, c.x))
                    .unwrap_or((0.0, 0.0));
                (y, x, r.text.replace("[UNK]", " "))
            })
            .collect();

        lines.sort_by(|a, b| {
            let row_a = (a.0 / 20.0) as i64;
            let row_b = (b.0 / 20.0) as i64;
            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        let text = lines
            .iter()
            .map(|(_, _, t)| t.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        info!(
            "local OCR complete: {} regions in {}ms",
            lines.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}
