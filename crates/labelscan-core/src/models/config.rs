//! Configuration structures for the label scanning pipeline.
//!
//! Engine choice and the remote API key are explicit configuration
//! loaded at startup and passed into the OCR layer; the extraction core
//! itself reads nothing from the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the labelscan pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelscanConfig {
    /// OCR engine configuration.
    pub ocr: OcrConfig,

    /// Label extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Which OCR engine to use for images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// On-device recognition with bundled ONNX models.
    Local,
    /// Cloud text-detection API.
    Remote,
}

impl Default for EngineKind {
    fn default() -> Self {
        Self::Local
    }
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine selection.
    pub engine: EngineKind,

    /// Directory containing local model files (det.onnx, rec.onnx,
    /// dict.txt).
    pub model_dir: PathBuf,

    /// Endpoint for the remote text-detection API.
    pub api_endpoint: String,

    /// API key for the remote engine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: EngineKind::Local,
            model_dir: PathBuf::from("models"),
            api_endpoint: "https://vision.googleapis.com/v1/images:annotate".to_string(),
            api_key: None,
        }
    }
}

/// Label extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Minimum trimmed length a line must exceed to qualify as a
    /// product name.
    pub min_product_name_len: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_product_name_len: 3,
        }
    }
}

impl LabelscanConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
