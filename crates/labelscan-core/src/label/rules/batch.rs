//! Batch/lot code extraction.

use super::patterns::BATCH_PATTERN;
use super::{ExtractionMatch, FieldExtractor};

/// Batch/lot code extractor. Expects uppercased input; the token is
/// captured verbatim.
pub struct BatchExtractor;

impl BatchExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BatchExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for BatchExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        BATCH_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let full_match = caps.get(0).unwrap();
                ExtractionMatch::new(caps[1].to_string(), full_match.as_str())
                    .with_position(full_match.start(), full_match.end())
            })
            .collect()
    }
}
