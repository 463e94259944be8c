//! Label field extraction: turns one OCR transcript into a
//! [`LabelFacts`] record.

use chrono::NaiveDate;
use tracing::debug;

use crate::models::config::ExtractionConfig;
use crate::models::label::LabelFacts;

use super::rules::{
    BatchExtractor, DateResolver, FieldExtractor, MrpExtractor, EXPIRY_MARKER, MFD_MARKER,
    MFD_STOP,
};

/// Keywords that disqualify a line from being the product name.
const RESERVED_KEYWORDS: [&str; 11] = [
    "EXP", "MFD", "MFG", "LOT", "BATCH", "BEST", "BEFORE", "USE", "BY", "MRP", "DATE",
];

/// Rule-based label parser.
///
/// Extraction is a pure function of the input transcript: no state is
/// kept between calls and every field independently degrades to absent
/// when its pattern does not apply, so `extract_details` never fails.
pub struct LabelParser {
    /// Minimum trimmed length a line must exceed to qualify as a
    /// product name.
    min_product_name_len: usize,
}

impl LabelParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        Self {
            min_product_name_len: 3,
        }
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            min_product_name_len: config.min_product_name_len,
        }
    }

    /// Set the product-name length threshold.
    pub fn with_min_product_name_len(mut self, len: usize) -> Self {
        self.min_product_name_len = len;
        self
    }

    /// Extract all label facts from an OCR transcript.
    pub fn extract_details(&self, raw_text: &str) -> LabelFacts {
        debug!("extracting label fields from {} chars", raw_text.len());

        let normalized = raw_text.replace("\r\n", "\n").replace('\r', "\n");
        let upper = normalized.to_uppercase();
        let resolver = DateResolver::new();

        let mut facts = LabelFacts::new(raw_text);
        facts.expiry_date = self.extract_expiry(&upper, &resolver);
        facts.manufactured_date = self.extract_manufactured(&upper, &resolver);
        facts.batch = BatchExtractor::new().extract(&upper).map(|m| m.value);
        facts.mrp = MrpExtractor::new().extract(&normalized).map(|m| m.value);
        facts.product_name = self.pick_product_name(&normalized);

        if let Some(batch) = &facts.batch {
            facts.labels.push(("Batch/Lot".to_string(), batch.clone()));
        }
        if let Some(mrp) = &facts.mrp {
            facts.labels.push(("MRP".to_string(), mrp.clone()));
        }
        if let Some(mfd) = facts.manufactured_date {
            facts
                .labels
                .push(("Manufactured".to_string(), mfd.format("%Y-%m-%d").to_string()));
        }

        debug!(
            "extracted expiry={:?} mfd={:?} batch={:?} mrp={:?}",
            facts.expiry_date, facts.manufactured_date, facts.batch, facts.mrp
        );

        facts
    }

    /// Expiry date: the line carrying the first expiry marker, whole
    /// text as fallback. The region starts at the marker itself so the
    /// best-before month probe can see its keyword.
    fn extract_expiry(&self, upper: &str, resolver: &DateResolver) -> Option<NaiveDate> {
        if let Some(m) = EXPIRY_MARKER.find(upper) {
            let rest = &upper[m.start()..];
            let line = rest.split('\n').next().unwrap_or(rest);
            if let Some(date) = resolver.resolve(line) {
                return Some(date);
            }
        }
        resolver.resolve(upper)
    }

    /// Manufacture date: from just after its marker up to the next
    /// field marker or end of text.
    fn extract_manufactured(&self, upper: &str, resolver: &DateResolver) -> Option<NaiveDate> {
        let m = MFD_MARKER.find(upper)?;
        let rest = &upper[m.end()..];
        let end = MFD_STOP.find(rest).map(|s| s.start()).unwrap_or(rest.len());
        resolver.resolve(&rest[..end])
    }

    /// First line long enough to be a name and free of field keywords.
    /// No fallback: a transcript of nothing but markers has no name.
    fn pick_product_name(&self, normalized: &str) -> Option<String> {
        normalized
            .split('\n')
            .map(str::trim)
            .filter(|line| line.len() > self.min_product_name_len)
            .find(|line| {
                let upper = line.to_uppercase();
                !RESERVED_KEYWORDS.iter().any(|kw| upper.contains(kw))
            })
            .map(str::to_string)
    }
}

impl Default for LabelParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_full_label() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("Exp: 12 JAN 2026  Batch: AB-123  MRP Rs.45.00");

        assert_eq!(facts.expiry_date, Some(date(2026, 1, 12)));
        assert_eq!(facts.batch.as_deref(), Some("AB-123"));
        assert_eq!(facts.mrp.as_deref(), Some("Rs.45.00"));
    }

    #[test]
    fn test_best_before_month_end() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("Best Before Mar 2026");
        assert_eq!(facts.expiry_date, Some(date(2026, 3, 31)));
    }

    #[test]
    fn test_manufactured_span_stops_before_lot() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("MFD 01/02/24 LOT XYZ9");

        assert_eq!(facts.manufactured_date, Some(date(2024, 2, 1)));
        assert_eq!(facts.batch.as_deref(), Some("XYZ9"));
    }

    #[test]
    fn test_expiry_prefers_marker_line() {
        let parser = LabelParser::new();
        let facts =
            parser.extract_details("MFD 2024-01-10\nEXP 2026-06-30\nLOT B-77");

        assert_eq!(facts.expiry_date, Some(date(2026, 6, 30)));
        assert_eq!(facts.manufactured_date, Some(date(2024, 1, 10)));
        assert_eq!(facts.batch.as_deref(), Some("B-77"));
    }

    #[test]
    fn test_expiry_falls_back_to_whole_text() {
        let parser = LabelParser::new();
        // No expiry marker at all; the only date in the transcript is
        // still reported.
        let facts = parser.extract_details("packed on 15.03.2025");
        assert_eq!(facts.expiry_date, Some(date(2025, 3, 15)));
    }

    #[test]
    fn test_no_date_anywhere() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("ACME CRUNCHY OATS\n500g net weight");

        assert_eq!(facts.expiry_date, None);
        assert_eq!(facts.manufactured_date, None);
        assert_eq!(facts.product_name.as_deref(), Some("ACME CRUNCHY OATS"));
    }

    #[test]
    fn test_product_name_skips_marker_lines() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("EXP 2026-01-01\nMRP Rs.10\nSunshine Biscuits\nLOT A1");
        assert_eq!(facts.product_name.as_deref(), Some("Sunshine Biscuits"));
    }

    #[test]
    fn test_product_name_absent_when_no_line_qualifies() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("EXP 2026-01-01\nabc");
        assert_eq!(facts.product_name, None);
    }

    #[test]
    fn test_labels_membership_and_order() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("MFD 01/02/24 LOT XYZ9 MRP Rs.5");

        let keys: Vec<&str> = facts.labels.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Batch/Lot", "MRP", "Manufactured"]);
        assert_eq!(facts.label("Manufactured"), Some("2024-02-01"));
        assert!(facts.label("Expiry").is_none());
        assert!(facts.label("Product").is_none());
    }

    #[test]
    fn test_labels_empty_when_nothing_found() {
        let parser = LabelParser::new();
        let facts = parser.extract_details("just some packaging text");
        assert!(facts.labels.is_empty());
    }

    #[test]
    fn test_extraction_is_pure() {
        let parser = LabelParser::new();
        let text = "Exp: 12 JAN 2026  Batch: AB-123  MRP Rs.45.00";
        assert_eq!(parser.extract_details(text), parser.extract_details(text));
    }

    #[test]
    fn test_raw_text_is_verbatim() {
        let parser = LabelParser::new();
        let text = "  EXP\t2026-01-01\r\nodd   spacing  ";
        let facts = parser.extract_details(text);
        assert_eq!(facts.raw_text, text);
    }

    #[test]
    fn test_use_by_and_bbe_markers() {
        let parser = LabelParser::new();

        let facts = parser.extract_details("USE BY 2026-05-01");
        assert_eq!(facts.expiry_date, Some(date(2026, 5, 1)));

        let facts = parser.extract_details("BBE 05/2026 10 APR 2026");
        assert_eq!(facts.expiry_date, Some(date(2026, 4, 10)));
    }

    #[test]
    fn test_configured_name_threshold() {
        let parser = LabelParser::new().with_min_product_name_len(10);
        let facts = parser.extract_details("Short name\nA much longer product line");
        assert_eq!(
            facts.product_name.as_deref(),
            Some("A much longer product line")
        );
    }
}
