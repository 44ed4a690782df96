//! Locale-invariant timestamp parsing.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};

/// Date and time layouts accepted in the timestamp column, tried in order.
///
/// Performance Monitor writes `MM/dd/yyyy HH:mm:ss.fff`. The other layouts
/// cover logs that were re-saved by spreadsheet tools.
const DATE_TIME_FORMATS: &[&str] = &[
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %I:%M:%S%.f %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts, read as midnight.
const DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%Y-%m-%d", "%Y/%m/%d"];

/// Parses a timestamp cell.
///
/// Returns `None` when no accepted layout matches. Offsets in RFC 3339 input
/// are dropped and the wall-clock time is kept.
#[must_use]
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(text)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32, ms: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_milli_opt(h, mi, s, ms)
            .unwrap()
    }

    #[test]
    fn test_perfmon_layout() {
        assert_eq!(
            parse_timestamp("02/08/2026 00:00:01.000"),
            Some(at(2026, 2, 8, 0, 0, 1, 0))
        );
        assert_eq!(
            parse_timestamp("12/31/2025 23:59:59.250"),
            Some(at(2025, 12, 31, 23, 59, 59, 250))
        );
    }

    #[test]
    fn test_month_comes_first() {
        let ts = parse_timestamp("02/08/2026 00:00:00.000").unwrap();
        assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2026, 2, 8).unwrap());
    }

    #[test]
    fn test_without_fraction_and_unpadded() {
        assert_eq!(
            parse_timestamp("2/8/2026 13:05:00"),
            Some(at(2026, 2, 8, 13, 5, 0, 0))
        );
        assert_eq!(
            parse_timestamp("02/08/2026 13:05"),
            Some(at(2026, 2, 8, 13, 5, 0, 0))
        );
    }

    #[test]
    fn test_twelve_hour_clock() {
        assert_eq!(
            parse_timestamp("02/08/2026 01:30:00 PM"),
            Some(at(2026, 2, 8, 13, 30, 0, 0))
        );
        assert_eq!(
            parse_timestamp("02/08/2026 12:15 AM"),
            Some(at(2026, 2, 8, 0, 15, 0, 0))
        );
    }

    #[test]
    fn test_iso_layouts() {
        let expected = Some(at(2026, 2, 8, 10, 0, 0, 500));
        assert_eq!(parse_timestamp("2026-02-08T10:00:00.500"), expected);
        assert_eq!(parse_timestamp("2026-02-08 10:00:00.500"), expected);
        assert_eq!(
            parse_timestamp("2026/02/08 10:00:00"),
            Some(at(2026, 2, 8, 10, 0, 0, 0))
        );
    }

    #[test]
    fn test_date_only_is_midnight() {
        let midnight = Some(at(2026, 2, 8, 0, 0, 0, 0));
        assert_eq!(parse_timestamp("02/08/2026"), midnight);
        assert_eq!(parse_timestamp("2026-02-08"), midnight);
    }

    #[test]
    fn test_rfc3339_keeps_wall_clock() {
        assert_eq!(
            parse_timestamp("2026-02-08T09:00:00+09:00"),
            Some(at(2026, 2, 8, 9, 0, 0, 0))
        );
        assert_eq!(
            parse_timestamp("2026-02-08T09:00:00Z"),
            Some(at(2026, 2, 8, 9, 0, 0, 0))
        );
    }

    #[test]
    fn test_surrounding_whitespace() {
        assert_eq!(
            parse_timestamp("  02/08/2026 00:00:01.000 "),
            Some(at(2026, 2, 8, 0, 0, 1, 0))
        );
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "   ", "not a date", "13/45/2026 00:00:00", "02/08/2026 25:00:00"] {
            assert_eq!(parse_timestamp(text), None, "{text:?}");
        }
    }
}
