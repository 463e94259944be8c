//! Date candidate resolution for product labels.
//!
//! A fixed, ordered table of notation probes runs over the whole input;
//! every valid parse becomes a candidate and the chronologically
//! earliest candidate wins. Earliest-wins is a pragmatic tie-break for
//! labels where spurious numeric matches tend to be later than the true
//! date; it is a documented heuristic, not a guarantee, and inputs with
//! several genuinely distinct dates in one unlabeled span may resolve
//! to the wrong one.

use chrono::NaiveDate;
use regex::{Captures, Regex};
use tracing::trace;

use super::patterns::{
    BEST_BEFORE_MONTH, DATE_ISO_LIKE, DATE_ISO_STRICT, DATE_MONTH_WORD, DATE_NUMERIC,
};
use super::{ExtractionMatch, FieldExtractor};

/// Date candidate resolver.
pub struct DateResolver;

type ProbeParser = fn(&Captures) -> Option<NaiveDate>;

/// One notation probe: a pattern plus the parse it implies.
struct DateProbe {
    name: &'static str,
    pattern: &'static Regex,
    parse: ProbeParser,
}

/// Probes in precedence order, most specific first. A later probe's
/// match contributes no candidate when its span lies inside a span an
/// earlier probe already claimed; that is what keeps `01/02/24` a
/// day-month-year reading and `Best Before Mar 2026` a month-end date
/// instead of a bare month word. Matches that merely brush against a
/// claimed span stay in the pool, so distinct substrings still compete
/// purely by earliest date.
fn probe_table() -> [DateProbe; 6] {
    [
        DateProbe {
            name: "best-before-month",
            pattern: &BEST_BEFORE_MONTH,
            parse: parse_best_before,
        },
        DateProbe {
            name: "month-word",
            pattern: &DATE_MONTH_WORD,
            parse: parse_month_word,
        },
        DateProbe {
            name: "iso-like",
            pattern: &DATE_ISO_LIKE,
            parse: parse_ymd,
        },
        DateProbe {
            name: "iso-strict",
            pattern: &DATE_ISO_STRICT,
            parse: parse_ymd,
        },
        DateProbe {
            name: "day-month-year",
            pattern: &DATE_NUMERIC,
            parse: parse_dmy,
        },
        DateProbe {
            name: "month-day-year",
            pattern: &DATE_NUMERIC,
            parse: parse_mdy,
        },
    ]
}

impl DateResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the single earliest valid calendar date in `text`.
    pub fn resolve(&self, text: &str) -> Option<NaiveDate> {
        self.extract(text).map(|m| m.value)
    }

    /// All date candidates in `text`, in probe order.
    pub fn candidates(&self, text: &str) -> Vec<ExtractionMatch<NaiveDate>> {
        let mut found: Vec<ExtractionMatch<NaiveDate>> = Vec::new();

        for probe in probe_table() {
            for caps in probe.pattern.captures_iter(text) {
                let full_match = caps.get(0).unwrap();
                let span = (full_match.start(), full_match.end());

                // Earlier probes own the spans they claim; only a
                // match wholly inside a claimed span is a re-reading
                // of the same text.
                if found
                    .iter()
                    .any(|f| f.position.is_some_and(|p| contains(p, span)))
                {
                    continue;
                }

                if let Some(date) = (probe.parse)(&caps) {
                    trace!("probe {} matched {:?} as {}", probe.name, full_match.as_str(), date);
                    found.push(
                        ExtractionMatch::new(date, full_match.as_str())
                            .with_position(span.0, span.1),
                    );
                }
            }
        }

        found
    }
}

impl Default for DateResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateResolver {
    type Output = ExtractionMatch<NaiveDate>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().min_by_key(|m| m.value)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        self.candidates(text)
    }
}

fn parse_ymd(caps: &Captures) -> Option<NaiveDate> {
    let year: i32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let day: u32 = caps[3].parse().unwrap_or(0);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_dmy(caps: &Captures) -> Option<NaiveDate> {
    let day: u32 = caps[1].parse().unwrap_or(0);
    let month: u32 = caps[2].parse().unwrap_or(0);
    let year = expand_year(&caps[3]);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_mdy(caps: &Captures) -> Option<NaiveDate> {
    let month: u32 = caps[1].parse().unwrap_or(0);
    let day: u32 = caps[2].parse().unwrap_or(0);
    let year = expand_year(&caps[3]);
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_month_word(caps: &Captures) -> Option<NaiveDate> {
    let day: u32 = caps
        .get(1)
        .map(|m| m.as_str().parse().unwrap_or(0))
        .unwrap_or(1);
    let month = month_number(&caps[2])?;
    let year = expand_year(&caps[3]);
    NaiveDate::from_ymd_opt(year, month, day)
}

/// A best-before month is valid through the month's end, so the last
/// calendar day of that month is constructed, not the first.
fn parse_best_before(caps: &Captures) -> Option<NaiveDate> {
    let month = month_number(&caps[1])?;
    let year = expand_year(&caps[2]);
    last_day_of_month(year, month)
}

/// Two-digit years are always 2000+yy; there is no pivot window.
fn expand_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if s.len() <= 2 { 2000 + year } else { year }
}

fn month_number(word: &str) -> Option<u32> {
    let prefix: String = word.to_lowercase().chars().take(3).collect();
    match prefix.as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_first?.pred_opt()
}

fn contains(outer: (usize, usize), inner: (usize, usize)) -> bool {
    outer.0 <= inner.0 && inner.1 <= outer.1
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_resolve_iso() {
        let resolver = DateResolver::new();
        assert_eq!(resolver.resolve("2026-01-15"), Some(date(2026, 1, 15)));
        assert_eq!(resolver.resolve("use within 2026/1/5"), Some(date(2026, 1, 5)));
    }

    #[test]
    fn test_resolve_dmy_two_digit_year() {
        let resolver = DateResolver::new();
        // Ambiguous numeric dates read day-first.
        assert_eq!(resolver.resolve("01/02/24"), Some(date(2024, 2, 1)));
        assert_eq!(resolver.resolve("15.01.26"), Some(date(2026, 1, 15)));
    }

    #[test]
    fn test_resolve_mdy_when_day_first_is_impossible() {
        let resolver = DateResolver::new();
        // 13/25 cannot be a day/month pair, so the month-day reading
        // is the only valid candidate.
        assert_eq!(resolver.resolve("12/25/2026"), Some(date(2026, 12, 25)));
    }

    #[test]
    fn test_resolve_month_word() {
        let resolver = DateResolver::new();
        assert_eq!(resolver.resolve("12 JAN 2026"), Some(date(2026, 1, 12)));
        assert_eq!(resolver.resolve("exp Sept 26"), Some(date(2026, 9, 1)));
        // Day defaults to the first of the month.
        assert_eq!(resolver.resolve("March 2027"), Some(date(2027, 3, 1)));
    }

    #[test]
    fn test_best_before_month_is_month_end() {
        let resolver = DateResolver::new();
        assert_eq!(resolver.resolve("Best Before Mar 2026"), Some(date(2026, 3, 31)));
        assert_eq!(resolver.resolve("BEST  BEFORE FEB 2028"), Some(date(2028, 2, 29)));
    }

    #[test]
    fn test_best_before_with_day_keeps_the_day() {
        let resolver = DateResolver::new();
        assert_eq!(
            resolver.resolve("best before 15 Mar 2026"),
            Some(date(2026, 3, 15))
        );
    }

    #[test]
    fn test_earliest_candidate_wins() {
        let resolver = DateResolver::new();
        assert_eq!(
            resolver.resolve("MFD 2025-12-01 EXP 2027-06-30"),
            Some(date(2025, 12, 1))
        );
        // Known limitation: an unlabeled span with two real dates
        // resolves to the earlier one even when the later one was
        // meant.
        assert_eq!(
            resolver.resolve("15 Jan 2027 01/01/2026"),
            Some(date(2026, 1, 1))
        );
    }

    #[test]
    fn test_invalid_calendar_dates_are_discarded() {
        let resolver = DateResolver::new();
        assert_eq!(resolver.resolve("30/02/2026"), None);
        assert_eq!(resolver.resolve("2026-13-01"), None);
        assert_eq!(resolver.resolve("2027-02-29"), None);
    }

    #[test]
    fn test_no_date_resolves_to_none() {
        let resolver = DateResolver::new();
        assert_eq!(resolver.resolve(""), None);
        assert_eq!(resolver.resolve("ACME CRUNCHY OATS 500g"), None);
        assert_eq!(resolver.resolve("LOT AB-123 MRP 45.00"), None);
    }

    #[test]
    fn test_candidates_carry_spans() {
        let resolver = DateResolver::new();
        let candidates = resolver.candidates("2026-01-15 and 15.02.2026");
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.position.is_some()));
    }

    #[test]
    fn test_shared_digits_do_not_suppress_a_distinct_date() {
        let resolver = DateResolver::new();
        // The month-word probe absorbs "24" from the tail of "1.2.24"
        // as its day; the numeric date it brushes against must still
        // compete, and it is the earlier one.
        assert_eq!(resolver.resolve("1.2.24 MAR 2026"), Some(date(2024, 2, 1)));

        let candidates = resolver.candidates("1.2.24 MAR 2026");
        assert!(candidates.iter().any(|c| c.value == date(2024, 2, 1)));
        assert!(candidates.iter().any(|c| c.value == date(2026, 3, 24)));
    }

    #[test]
    fn test_same_span_is_claimed_once() {
        let resolver = DateResolver::new();
        // Both numeric probes match this span; only the day-first
        // reading survives.
        let candidates = resolver.candidates("01/02/24");
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].value, date(2024, 2, 1));
    }
}
