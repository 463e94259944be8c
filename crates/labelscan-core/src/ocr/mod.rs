//! OCR engines that turn a label photo into a transcript.
//!
//! The extraction core is source-agnostic; it only ever sees the
//! transcript string. Engines are selected by configuration behind one
//! capability trait. Timeouts, retries and progress reporting are the
//! caller's concern.

#[cfg(feature = "native")]
mod local;
#[cfg(feature = "remote")]
mod remote;

#[cfg(feature = "native")]
pub use local::PureOcrEngine;
#[cfg(feature = "remote")]
pub use remote::RemoteVisionEngine;

use image::DynamicImage;

use crate::error::OcrError;
use crate::models::config::{EngineKind, LabelscanConfig};

/// A text-recognition engine.
pub trait OcrEngine {
    /// Engine name for logs and output metadata.
    fn name(&self) -> &'static str;

    /// Recognize all text in an image and return it as one transcript,
    /// lines separated by newlines.
    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError>;
}

/// Create the engine selected by configuration.
pub fn create_engine(config: &LabelscanConfig) -> Result<Box<dyn OcrEngine>, OcrError> {
    match config.ocr.engine {
        EngineKind::Local => {
            #[cfg(feature = "native")]
            return Ok(Box::new(PureOcrEngine::from_dir(&config.ocr.model_dir)?));

            #[cfg(not(feature = "native"))]
            return Err(OcrError::Unavailable(
                "local engine requires the `native` feature".to_string(),
            ));
        }
        EngineKind::Remote => {
            #[cfg(feature = "remote")]
            return Ok(Box::new(RemoteVisionEngine::new(
                config.ocr.api_endpoint.clone(),
                config.ocr.api_key.clone(),
            )?));

            #[cfg(not(feature = "remote"))]
            return Err(OcrError::Unavailable(
                "remote engine requires the `remote` feature".to_string(),
            ));
        }
    }
}
