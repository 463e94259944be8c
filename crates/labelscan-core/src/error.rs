//! Error types for the labelscan-core library.

use thiserror::Error;

/// Main error type for the labelscan library.
///
/// Label field extraction itself is total and never produces an error;
/// these variants cover the surrounding plumbing (OCR engines, images,
/// configuration files).
#[derive(Error, Debug)]
pub enum LabelscanError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image processing error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unsupported input file format.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Remote text-detection request failed.
    #[error("remote OCR request failed: {0}")]
    Remote(String),

    /// The configured engine is not available in this build.
    #[error("OCR engine not available: {0}")]
    Unavailable(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Result type for the labelscan library.
pub type Result<T> = std::result::Result<T, LabelscanError>;
