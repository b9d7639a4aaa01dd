//! Domain models for the EOW report pipeline.
//!
//! - [`CellValue`] - a single cell as read from the source workbook
//! - [`RawRow`] - one source row (combined timestamp plus passthrough data)
//! - [`CleanRow`] - a transformed row with split date/time and a display flag
//! - [`DisplayRow`] - the five values written to the report, in column order

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display format for the `Date` column.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

/// Display format for the `Time` column.
pub const TIME_FORMAT: &str = "%H:%M";

/// Source column holding the combined timestamp.
pub const COL_DATE_TIME: &str = "Date Time";
pub const COL_EVENT: &str = "Event";
pub const COL_PRIOR: &str = "Prior";
pub const COL_SURVEY: &str = "Survey";

/// Columns the source sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE_TIME, COL_EVENT, COL_PRIOR, COL_SURVEY];

/// Report columns, in output order.
pub const OUTPUT_COLUMNS: [&str; 5] = ["Date", "Time", "Event", "Prior", "Survey"];

// =============================================================================
// Cell Value
// =============================================================================

/// A spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
}

impl CellValue {
    /// Build a text cell. The text is kept as written; only an empty
    /// string maps to [`CellValue::Empty`].
    pub fn text(s: impl Into<String>) -> Self {
        let s = s.into();
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => f.write_str(s),
            CellValue::Number(n) => {
                // Integral values print without a trailing ".0"
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            CellValue::Bool(b) => f.write_str(if *b { "TRUE" } else { "FALSE" }),
            CellValue::DateTime(dt) => write!(f, "{}", dt.format("%Y-%m-%d %H:%M:%S")),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::text(s)
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(dt: NaiveDateTime) -> Self {
        CellValue::DateTime(dt)
    }
}

// =============================================================================
// Rows
// =============================================================================

/// One row of the source sheet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRow {
    /// Combined date and time, possibly empty or unparseable.
    pub date_time: CellValue,
    pub event: String,
    pub prior: CellValue,
    pub survey: CellValue,
}

impl RawRow {
    pub fn new(
        date_time: impl Into<CellValue>,
        event: impl Into<String>,
        prior: impl Into<CellValue>,
        survey: impl Into<CellValue>,
    ) -> Self {
        Self {
            date_time: date_time.into(),
            event: event.into(),
            prior: prior.into(),
            survey: survey.into(),
        }
    }

    /// Returns true when every field is blank.
    pub fn is_blank(&self) -> bool {
        self.date_time.is_empty()
            && self.event.trim().is_empty()
            && self.prior.is_empty()
            && self.survey.is_empty()
    }
}

/// A transformed row.
///
/// The true date is always kept; `show_date` only controls whether the
/// report prints it (repeated dates are hidden to mimic merged cells).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanRow {
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub event: String,
    pub prior: CellValue,
    pub survey: CellValue,
    pub show_date: bool,
}

impl CleanRow {
    /// `mm/dd/yyyy`, or an empty string when hidden or unknown.
    pub fn display_date(&self) -> String {
        match self.date {
            Some(date) if self.show_date => date.format(DATE_FORMAT).to_string(),
            _ => String::new(),
        }
    }

    /// `HH:MM` (24-hour), or an empty string when unknown.
    pub fn display_time(&self) -> String {
        self.time
            .map(|t| t.format(TIME_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn timestamp(&self) -> Option<NaiveDateTime> {
        match (self.date, self.time) {
            (Some(d), Some(t)) => Some(d.and_time(t)),
            _ => None,
        }
    }

    pub fn to_display(&self) -> DisplayRow {
        DisplayRow {
            date: self.display_date(),
            time: self.display_time(),
            event: self.event.clone(),
            prior: self.prior.clone(),
            survey: self.survey.clone(),
        }
    }
}

/// A report row exactly as written: `Date, Time, Event, Prior, Survey`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayRow {
    pub date: String,
    pub time: String,
    pub event: String,
    pub prior: CellValue,
    pub survey: CellValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(date: Option<NaiveDate>, time: Option<NaiveTime>, show_date: bool) -> CleanRow {
        CleanRow {
            date,
            time,
            event: "CPI".into(),
            prior: CellValue::Number(3.1),
            survey: CellValue::text("3.0"),
            show_date,
        }
    }

    #[test]
    fn test_text_kept_verbatim() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::text(" 52 "), CellValue::Text(" 52 ".into()));
        assert_eq!(CellValue::text("   ").to_string(), "   ");
    }

    #[test]
    fn test_number_display() {
        assert_eq!(CellValue::Number(52.0).to_string(), "52");
        assert_eq!(CellValue::Number(2.1).to_string(), "2.1");
        assert_eq!(CellValue::Empty.to_string(), "");
    }

    #[test]
    fn test_display_date_and_time() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 28);
        let time = NaiveTime::from_hms_opt(8, 30, 0);

        let shown = row(date, time, true);
        assert_eq!(shown.display_date(), "03/28/2025");
        assert_eq!(shown.display_time(), "08:30");

        // Hidden dates keep the underlying value
        let hidden = row(date, time, false);
        assert_eq!(hidden.display_date(), "");
        assert_eq!(hidden.date, date);
    }

    #[test]
    fn test_null_timestamp_displays_blank() {
        let r = row(None, None, true);
        assert_eq!(r.display_date(), "");
        assert_eq!(r.display_time(), "");
        assert!(r.timestamp().is_none());
    }

    #[test]
    fn test_raw_row_blank() {
        assert!(RawRow::default().is_blank());
        assert!(!RawRow::new(CellValue::Empty, "GDP", CellValue::Empty, CellValue::Empty).is_blank());
    }
}
