//! Remote OCR engine using a cloud text-detection API.

use std::io::Cursor;
use std::time::Instant;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::DynamicImage;
use tracing::{debug, info};

use crate::error::OcrError;

use super::OcrEngine;

/// Cloud text detection via a Vision-style `images:annotate` endpoint.
///
/// The image is sent base64-encoded in one blocking request; the
/// transcript comes back as the full text annotation.
pub struct RemoteVisionEngine {
    client: reqwest::blocking::Client,
    endpoint: String,
    api_key: String,
}

impl RemoteVisionEngine {
    pub fn new(endpoint: String, api_key: Option<String>) -> Result<Self, OcrError> {
        let api_key = api_key.ok_or_else(|| {
            OcrError::Unavailable("remote engine requires an API key in the configuration".to_string())
        })?;

        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| OcrError::Remote(e.to_string()))?;

        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }
}

impl OcrEngine for RemoteVisionEngine {
    fn name(&self) -> &'static str {
        "remote-vision"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<String, OcrError> {
        let start = Instant::now();

        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        let body = serde_json::json!({
            "requests": [{
                "image": { "content": BASE64.encode(&png) },
                "features": [{ "type": "TEXT_DETECTION" }],
            }]
        });

        debug!("posting {} byte image to {}", png.len(), self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| OcrError::Remote(e.to_string()))?;

        if !response.status().is_success() {
            return Err(OcrError::Remote(format!(
                "annotate request returned {}",
                response.status()
            )));
        }

        let payload: serde_json::Value = response
            .json()
            .map_err(|e| OcrError::Remote(e.to_string()))?;

        let text = payload["responses"][0]["fullTextAnnotation"]["text"]
            .as_str()
            .or_else(|| payload["responses"][0]["textAnnotations"][0]["description"].as_str())
            .unwrap_or("")
            .to_string();

        info!(
            "remote OCR complete: {} chars in {}ms",
            text.len(),
            start.elapsed().as_millis()
        );

        Ok(text)
    }
}
