//! Label field extraction module.

mod parser;
pub mod rules;

pub use parser::LabelParser;

use crate::models::label::LabelFacts;

/// Extract label facts from a transcript with default settings.
pub fn extract_details(raw_text: &str) -> LabelFacts {
    LabelParser::new().extract_details(raw_text)
}
