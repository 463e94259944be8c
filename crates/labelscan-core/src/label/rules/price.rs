//! Printed-price (MRP) extraction.
//!
//! The captured value is a display string; it keeps its currency marker
//! and original casing and is never parsed to a number.

use super::patterns::{MRP_PATTERN, WHITESPACE};
use super::{ExtractionMatch, FieldExtractor};

/// MRP extractor. Runs over original-case text.
pub struct MrpExtractor;

impl MrpExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MrpExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for MrpExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        MRP_PATTERN
            .captures_iter(text)
            .map(|caps| {
                let full_match = caps.get(0).unwrap();
                let value = WHITESPACE.replace_all(&caps[1], "");
                let value = value.trim_end_matches(['.', ',']).to_string();
                ExtractionMatch::new(value, full_match.as_str())
                    .with_position(full_match.start(), full_match.end())
            })
            .collect()
    }
}
