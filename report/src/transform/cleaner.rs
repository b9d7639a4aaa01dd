//! Raw rows → clean, sorted, date-grouped rows.
//!
//! 1. Parse the combined timestamp (unparseable values become null)
//! 2. Split into date and time of day
//! 3. Stable sort by (date, time); null timestamps sort first
//! 4. Mark the first row of each date run for display
//!
//! Row count and every (event, prior, survey) triple are preserved.

use chrono::NaiveDate;
use serde::Serialize;

use super::grouper::{date_group_count, group_dates};
use super::timestamp::{parse_timestamp, parse_timestamp_str};
use crate::models::{CellValue, CleanRow, DisplayRow, RawRow, DATE_FORMAT};

/// Counters from one transform run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformStats {
    /// Rows in (and out).
    pub total: usize,
    /// Rows whose timestamp could not be parsed.
    pub unparsed: usize,
    /// Distinct date runs in the output.
    pub date_groups: usize,
}

/// Transform raw rows into display-ready rows.
pub fn clean_rows(raw: Vec<RawRow>) -> Vec<CleanRow> {
    clean_rows_with_stats(raw).0
}

/// Same as [`clean_rows`], also returning counters.
pub fn clean_rows_with_stats(raw: Vec<RawRow>) -> (Vec<CleanRow>, TransformStats) {
    let total = raw.len();
    let mut unparsed = 0;

    let mut rows: Vec<CleanRow> = raw
        .into_iter()
        .map(|r| {
            let ts = parse_timestamp(&r.date_time);
            if ts.is_none() {
                unparsed += 1;
            }
            CleanRow {
                date: ts.map(|t| t.date()),
                time: ts.map(|t| t.time()),
                event: r.event,
                prior: r.prior,
                survey: r.survey,
                show_date: true,
            }
        })
        .collect();

    // Option orders None before Some, so null timestamps come first.
    // sort_by_key is stable: equal keys keep input order.
    rows.sort_by_key(CleanRow::timestamp);
    group_dates(&mut rows);

    let stats = TransformStats {
        total,
        unparsed,
        date_groups: date_group_count(&rows),
    };
    (rows, stats)
}

/// Rebuild raw rows from a written report.
///
/// A blank date means "same date as the row above", which is how the
/// report displays runs of one date.
pub fn raw_rows_from_display(rows: &[DisplayRow]) -> Vec<RawRow> {
    let mut current_date: Option<NaiveDate> = None;

    rows.iter()
        .map(|row| {
            if !row.date.trim().is_empty() {
                current_date = NaiveDate::parse_from_str(row.date.trim(), DATE_FORMAT).ok();
            }

            let date_time = match current_date {
                Some(date) if !row.time.trim().is_empty() => {
                    let text = format!("{} {}", date.format(DATE_FORMAT), row.time.trim());
                    match parse_timestamp_str(&text) {
                        Some(dt) => CellValue::DateTime(dt),
                        None => CellValue::Text(text),
                    }
                }
                _ => CellValue::Empty,
            };

            RawRow {
                date_time,
                event: row.event.clone(),
                prior: row.prior.clone(),
                survey: row.survey.clone(),
            }
        })
        .collect()
}

/// Display rows for a set of clean rows.
pub fn to_display_rows(rows: &[CleanRow]) -> Vec<DisplayRow> {
    rows.iter().map(CleanRow::to_display).collect()
}
