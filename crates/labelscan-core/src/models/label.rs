//! Structured facts extracted from a product label.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Facts extracted from one OCR transcript of a product label.
///
/// Built once per transcript by
/// [`LabelParser`](crate::label::LabelParser) and never mutated
/// afterwards. Every field except `raw_text` is best-effort: a field
/// the heuristics could not determine is simply absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelFacts {
    /// The original OCR transcript, verbatim.
    pub raw_text: String,

    /// Expiry / best-before date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<NaiveDate>,

    /// Manufacture date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manufactured_date: Option<NaiveDate>,

    /// Batch or lot code (uppercase, alphanumeric and hyphens).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,

    /// Printed price (MRP), kept as a display string with its currency
    /// marker. Never parsed to a number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mrp: Option<String>,

    /// Heuristically chosen product-name line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    /// Display labels in insertion order: "Batch/Lot", "MRP",
    /// "Manufactured" for whichever fields were found. Expiry and
    /// product name are surfaced through their own fields, never here.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<(String, String)>,
}

impl LabelFacts {
    /// Create an empty result for a transcript.
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            expiry_date: None,
            manufactured_date: None,
            batch: None,
            mrp: None,
            product_name: None,
            labels: Vec::new(),
        }
    }

    /// Look up a display label by field name.
    pub fn label(&self, name: &str) -> Option<&str> {
        self.labels
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// True when no field at all was detected.
    pub fn is_empty(&self) -> bool {
        self.expiry_date.is_none()
            && self.manufactured_date.is_none()
            && self.batch.is_none()
            && self.mrp.is_none()
            && self.product_name.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_lookup() {
        let mut facts = LabelFacts::new("MRP Rs.10");
        facts.mrp = Some("Rs.10".to_string());
        facts.labels.push(("MRP".to_string(), "Rs.10".to_string()));

        assert_eq!(facts.label("MRP"), Some("Rs.10"));
        assert_eq!(facts.label("Batch/Lot"), None);
        assert!(!facts.is_empty());
    }

    #[test]
    fn test_empty_facts() {
        let facts = LabelFacts::new("nothing useful here");
        assert!(facts.is_empty());
        assert!(facts.labels.is_empty());
    }
}
