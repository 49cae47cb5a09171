//! Cell to text conversion.
//!
//! Laboratory exports mix typed and text cells for the same field, so every
//! cell is rendered as text before any processing.

use calamine::Data;
use chrono::{Days, NaiveDate, NaiveTime};

/// Seconds in one day, used to split spreadsheet date serials.
const SECONDS_PER_DAY: f64 = 86_400.0;

/// Converts a spreadsheet cell to its text representation.
///
/// Returns an empty string for empty cells, formats numbers without trailing
/// zeros, and renders date cells as `YYYY-MM-DD` (or `YYYY-MM-DD HH:MM:SS`
/// when the cell carries a time of day).
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(n) => n.to_string(),
        Data::Float(n) => format_numeric(*n),
        Data::Bool(b) => if *b { "True" } else { "False" }.to_string(),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            serial_to_text(serial).unwrap_or_else(|| format_numeric(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#{e:?}"),
    }
}

/// Formats a floating-point number as a string without trailing zeros after decimal.
///
/// Integer-valued floats like 40.0 are formatted as "40".
///
/// # Examples
///
/// ```
/// use lab_ingest::format_numeric;
///
/// assert_eq!(format_numeric(1.0), "1");
/// assert_eq!(format_numeric(1.50), "1.5");
/// assert_eq!(format_numeric(95.0), "95");
/// ```
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').trim_end_matches('.');
        if trimmed.is_empty() {
            "0".to_string()
        } else {
            trimmed.to_string()
        }
    } else {
        s
    }
}

/// Converts a 1900-system date serial to text.
fn serial_to_text(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let days = serial.trunc();
    let date = epoch.checked_add_days(Days::new(days as u64))?;
    let seconds = ((serial - days) * SECONDS_PER_DAY).round() as u32;
    if seconds == 0 || seconds >= SECONDS_PER_DAY as u32 {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    let time = NaiveTime::from_num_seconds_from_midnight_opt(seconds, 0)?;
    Some(date.and_time(time).format("%Y-%m-%d %H:%M:%S").to_string())
}
