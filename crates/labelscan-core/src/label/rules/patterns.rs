//! Common regex patterns for product-label extraction.
//!
//! Marker patterns are written without `(?i)` because the parser runs
//! them over an uppercased copy of the transcript; patterns that must
//! preserve the original casing of their capture (MRP) carry `(?i)`.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Numeric date shapes
    pub static ref DATE_ISO_LIKE: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_ISO_STRICT: Regex = Regex::new(
        r"\b(\d{4})-(\d{2})-(\d{2})\b"
    ).unwrap();

    // Shared by the day-month-year and month-day-year probes, which
    // read the same shape with swapped day/month positions.
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})\b"
    ).unwrap();

    // Month-word dates: optional day, three-letter-or-longer month
    // name ("Sept" included via the trailing letters), 2- or 4-digit
    // year.
    pub static ref DATE_MONTH_WORD: Regex = Regex::new(
        r"(?i)\b(?:(\d{1,2})[\s.,/\-]+)?(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\.?[\s.,/\-]+(\d{4}|\d{2})\b"
    ).unwrap();

    // "Best before <Month> <Year>" with no day given.
    pub static ref BEST_BEFORE_MONTH: Regex = Regex::new(
        r"(?i)BEST\s+BEFORE\s*[:.]?\s*(JAN|FEB|MAR|APR|MAY|JUN|JUL|AUG|SEP|OCT|NOV|DEC)[A-Z]*\.?[\s.,/\-]+(\d{4}|\d{2})\b"
    ).unwrap();

    // Field markers
    pub static ref EXPIRY_MARKER: Regex = Regex::new(
        r"EXPIRY|EXPIRATION|EXP|USE\s+BY|BEST\s+BEFORE|BBE"
    ).unwrap();

    pub static ref MFD_MARKER: Regex = Regex::new(
        r"MANUFACTURED|MFD|MFG"
    ).unwrap();

    pub static ref MFD_STOP: Regex = Regex::new(
        r"LOT|BATCH|EXP|USE|BEST"
    ).unwrap();

    // Batch/lot code following its marker.
    pub static ref BATCH_PATTERN: Regex = Regex::new(
        r"\b(?:LOT|BATCH)\b[\s.:#]*([A-Z0-9][A-Z0-9\-]*)"
    ).unwrap();

    // Printed price: optional currency marker, digits with . and ,
    pub static ref MRP_PATTERN: Regex = Regex::new(
        r"(?i)\bMRP\b[\s.:]*((?:₹|\$|€|£|RS\.?|INR)?\s*[0-9][0-9.,]*)"
    ).unwrap();

    pub static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_date_shapes() {
        assert!(DATE_ISO_LIKE.is_match("2026/1/5"));
        assert!(DATE_ISO_STRICT.is_match("2026-01-15"));
        assert!(!DATE_ISO_STRICT.is_match("2026/01/15"));
        assert!(DATE_NUMERIC.is_match("15.01.26"));
        assert!(!DATE_NUMERIC.is_match("45.00"));
    }

    #[test]
    fn test_month_word_shapes() {
        assert!(DATE_MONTH_WORD.is_match("12 JAN 2026"));
        assert!(DATE_MONTH_WORD.is_match("Sept 26"));
        assert!(DATE_MONTH_WORD.is_match("march 2027"));
        assert!(!DATE_MONTH_WORD.is_match("JAN"));
    }

    #[test]
    fn test_markers() {
        assert!(EXPIRY_MARKER.is_match("EXP:"));
        assert!(EXPIRY_MARKER.is_match("USE  BY"));
        assert!(EXPIRY_MARKER.is_match("BBE"));
        assert!(MFD_MARKER.is_match("MFG DATE"));
        assert!(!MFD_MARKER.is_match("LOT 42"));
    }

    #[test]
    fn test_batch_token() {
        let caps = BATCH_PATTERN.captures("BATCH: AB-123").unwrap();
        assert_eq!(&caps[1], "AB-123");

        let caps = BATCH_PATTERN.captures("LOT XYZ9").unwrap();
        assert_eq!(&caps[1], "XYZ9");
    }

    #[test]
    fn test_mrp_capture_keeps_casing() {
        let caps = MRP_PATTERN.captures("MRP Rs.45.00").unwrap();
        assert_eq!(&caps[1], "Rs.45.00");

        let caps = MRP_PATTERN.captures("mrp: ₹ 99,50").unwrap();
        assert_eq!(&caps[1], "₹ 99,50");
    }
}
