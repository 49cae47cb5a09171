//! Date parsing for birth and event dates.
//!
//! Laboratory exports write dates in several day-first and month-first
//! layouts, sometimes with a time of day. Parsing never fails a row: a value
//! that matches no known layout resolves to an empty date.

use chrono::{Datelike, NaiveDate, NaiveDateTime};

/// Explicit date layouts, tried in order before any inference.
const DATE_FORMATS: [&str; 4] = ["%d/%m/%Y", "%Y-%m-%d", "%d-%m-%Y", "%m/%d/%Y"];

/// Date-time layouts accepted by inference.
///
/// Slash layouts with a time are read month-first, then day-first.
const INFERRED_DATETIME_FORMATS: [&str; 10] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

/// Date-only layouts accepted by inference.
const INFERRED_DATE_FORMATS: [&str; 5] = ["%Y/%m/%d", "%Y%m%d", "%d.%m.%Y", "%m/%d/%y", "%d %b %Y"];

/// Parses a date using the explicit layouts, then general inference.
///
/// Four-digit years are required by the explicit layouts; a two-digit year
/// is only accepted by the month-first inference layout.
pub fn parse_flexible_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| parse_full_year(trimmed, format))
        .or_else(|| infer_date(trimmed))
}

/// Formats a raw date as ISO `YYYY-MM-DD`, or returns an empty string.
pub fn to_iso_date(raw: &str) -> String {
    parse_flexible_date(raw)
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

/// Whole years between `birth` and `reference`.
///
/// One year is subtracted when the birthday has not been reached yet in the
/// reference year.
pub fn age_on(birth: NaiveDate, reference: NaiveDate) -> i32 {
    let before_birthday = (reference.month(), reference.day()) < (birth.month(), birth.day());
    reference.year() - birth.year() - i32::from(before_birthday)
}

/// Age from an ISO birth date; `None` when the date is empty or invalid.
pub fn age_from_iso(iso: &str, reference: NaiveDate) -> Option<i32> {
    if iso.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(iso, "%Y-%m-%d")
        .ok()
        .map(|birth| age_on(birth, reference))
}

fn parse_full_year(value: &str, format: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, format)
        .ok()
        .filter(|date| date.year() >= 1000)
}

fn infer_date(value: &str) -> Option<NaiveDate> {
    INFERRED_DATETIME_FORMATS
        .iter()
        .find_map(|format| {
            NaiveDateTime::parse_from_str(value, format)
                .ok()
                .map(|dt| dt.date())
                .filter(|date| date.year() >= 1000)
        })
        .or_else(|| {
            INFERRED_DATE_FORMATS
                .iter()
                .find_map(|format| parse_full_year(value, format))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn explicit_layouts_in_priority_order() {
        // Day-first wins for ambiguous slash dates.
        assert_eq!(parse_flexible_date("01/02/2023"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_flexible_date("2023-02-01"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_flexible_date("01-02-2023"), Some(ymd(2023, 2, 1)));
        // Only valid month-first.
        assert_eq!(parse_flexible_date("12/31/2022"), Some(ymd(2022, 12, 31)));
        assert_eq!(parse_flexible_date("5/3/1990"), Some(ymd(1990, 3, 5)));
    }

    #[test]
    fn inference_handles_timestamps() {
        assert_eq!(
            parse_flexible_date("2023-02-01 00:00:00"),
            Some(ymd(2023, 2, 1))
        );
        assert_eq!(
            parse_flexible_date("2023-02-01T08:30:15"),
            Some(ymd(2023, 2, 1))
        );
        assert_eq!(parse_flexible_date("2023/02/01"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_flexible_date("20230201"), Some(ymd(2023, 2, 1)));
        assert_eq!(parse_flexible_date("01/02/23"), Some(ymd(2023, 1, 2)));
    }

    #[test]
    fn unparseable_is_none() {
        assert_eq!(parse_flexible_date(""), None);
        assert_eq!(parse_flexible_date("sin fecha"), None);
        assert_eq!(parse_flexible_date("31/31/2023"), None);
    }

    #[test]
    fn iso_formatting() {
        assert_eq!(to_iso_date(" 15/08/1985 "), "1985-08-15");
        assert_eq!(to_iso_date("desconocida"), "");
    }

    #[test]
    fn age_adjusts_for_birthday() {
        let reference = ymd(2024, 6, 15);
        assert_eq!(age_on(ymd(2000, 6, 15), reference), 24);
        assert_eq!(age_on(ymd(2000, 6, 16), reference), 23);
        assert_eq!(age_on(ymd(2006, 6, 16), reference), 17);
        assert_eq!(age_on(ymd(2006, 6, 14), reference), 18);
    }

    #[test]
    fn age_from_iso_handles_missing() {
        let reference = ymd(2024, 1, 1);
        assert_eq!(age_from_iso("1990-01-01", reference), Some(34));
        assert_eq!(age_from_iso("", reference), None);
    }
}
