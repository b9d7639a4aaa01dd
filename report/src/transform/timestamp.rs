//! Lenient timestamp parsing for the `Date Time` column.
//!
//! Anything that cannot be read as a date-time yields `None`; callers keep
//! the row and leave its date and time blank.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};

use crate::models::CellValue;

/// Date-time text layouts, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    // Two-digit years before four: %Y would read "25" as year 25
    "%m/%d/%y %H:%M",
    "%m/%d/%y %H:%M:%S",
    "%m/%d/%y %I:%M %p",
    "%m/%d/%y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %I:%M:%S %p",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

/// Date-only layouts; the time defaults to midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%y", "%m/%d/%Y", "%Y/%m/%d"];

/// Parse a cell into a date-time.
pub fn parse_timestamp(value: &CellValue) -> Option<NaiveDateTime> {
    match value {
        CellValue::DateTime(dt) => Some(*dt),
        CellValue::Number(serial) => from_excel_serial(*serial),
        CellValue::Text(s) => parse_timestamp_str(s),
        CellValue::Empty | CellValue::Bool(_) => None,
    }
}

/// Parse date-time text in any of the supported layouts.
pub fn parse_timestamp_str(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Convert an Excel serial number (1900 date system) to a date-time.
///
/// The fractional part is the time of day, rounded to the nearest second.
pub fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || serial < 0.0 || serial > 2_958_465.0 {
        return None;
    }

    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?.and_hms_opt(0, 0, 0)?;
    let seconds = (serial * 86_400.0).round() as i64;
    epoch.checked_add_signed(Duration::try_seconds(seconds)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn dt(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_time(NaiveTime::from_hms_opt(h, min, 0).unwrap())
    }

    #[test]
    fn test_iso_formats() {
        assert_eq!(parse_timestamp_str("2025-03-28 08:30"), Some(dt(2025, 3, 28, 8, 30)));
        assert_eq!(parse_timestamp_str("2025-03-28 08:30:00"), Some(dt(2025, 3, 28, 8, 30)));
        assert_eq!(parse_timestamp_str("2025-03-28T08:30:00"), Some(dt(2025, 3, 28, 8, 30)));
        assert_eq!(parse_timestamp_str("2025-03-28T08:30:00Z"), Some(dt(2025, 3, 28, 8, 30)));
    }

    #[test]
    fn test_us_formats() {
        assert_eq!(parse_timestamp_str("03/28/2025 08:30"), Some(dt(2025, 3, 28, 8, 30)));
        assert_eq!(parse_timestamp_str("03/28/2025 2:15 PM"), Some(dt(2025, 3, 28, 14, 15)));
        assert_eq!(parse_timestamp_str("3/31/25 09:00"), Some(dt(2025, 3, 31, 9, 0)));
    }

    #[test]
    fn test_two_digit_years() {
        assert_eq!(parse_timestamp_str("03/31/25"), Some(dt(2025, 3, 31, 0, 0)));
        assert_eq!(parse_timestamp_str("03/31/25 09:00:00"), Some(dt(2025, 3, 31, 9, 0)));
        assert_eq!(parse_timestamp_str("03/31/25 2:15 PM"), Some(dt(2025, 3, 31, 14, 15)));
        assert_eq!(parse_timestamp_str("03/31/25 2:15:00 PM"), Some(dt(2025, 3, 31, 14, 15)));
        // Four-digit years still go to %Y
        assert_eq!(parse_timestamp_str("03/31/2025 2:15 PM"), Some(dt(2025, 3, 31, 14, 15)));
        assert_eq!(parse_timestamp_str("03/31/2025 09:00:00"), Some(dt(2025, 3, 31, 9, 0)));
    }

    #[test]
    fn test_date_only_is_midnight() {
        assert_eq!(parse_timestamp_str("2025-03-31"), Some(dt(2025, 3, 31, 0, 0)));
        assert_eq!(parse_timestamp_str("03/31/2025"), Some(dt(2025, 3, 31, 0, 0)));
    }

    #[test]
    fn test_unparseable_is_none() {
        assert_eq!(parse_timestamp_str("TBD"), None);
        assert_eq!(parse_timestamp_str(""), None);
        assert_eq!(parse_timestamp_str("2025-13-45 10:00"), None);
        assert_eq!(parse_timestamp(&CellValue::Bool(true)), None);
        assert_eq!(parse_timestamp(&CellValue::Empty), None);
    }

    #[test]
    fn test_excel_serial() {
        // 45744 is 2025-03-28; .5 is noon
        assert_eq!(from_excel_serial(45744.5), Some(dt(2025, 3, 28, 12, 0)));
        assert_eq!(
            parse_timestamp(&CellValue::Number(45744.0 + 8.5 / 24.0)),
            Some(dt(2025, 3, 28, 8, 30))
        );
        assert_eq!(from_excel_serial(-1.0), None);
        assert_eq!(from_excel_serial(f64::NAN), None);
    }
}
