//! Display grouping of consecutive rows that share a date.
//!
//! Only the first row of each run of equal dates shows its date, which
//! reads like a merged cell in the finished report:
//!
//! ```text
//! Sorted rows                    →  Displayed
//! ┌────────────┬───────┬─────┐      ┌────────────┬───────┬─────┐
//! │ 03/28/2025 │ 08:30 │ CPI │      │ 03/28/2025 │ 08:30 │ CPI │
//! │ 03/28/2025 │ 10:00 │ PMI │  →   │            │ 10:00 │ PMI │
//! │ 03/31/2025 │ 09:00 │ GDP │      │ 03/31/2025 │ 09:00 │ GDP │
//! └────────────┴───────┴─────┘      └────────────┴───────┴─────┘
//! ```
//!
//! The underlying date is never touched; only [`CleanRow::show_date`] changes.

use crate::models::CleanRow;

/// Set `show_date` on each row: true for the first row of every date run.
///
/// Row order and every other field are left as they are.
pub fn group_dates(rows: &mut [CleanRow]) {
    let mut previous = None;
    for (i, row) in rows.iter_mut().enumerate() {
        row.show_date = i == 0 || row.date != previous;
        previous = row.date;
    }
}

/// Number of distinct date runs (rows that show their date).
pub fn date_group_count(rows: &[CleanRow]) -> usize {
    rows.iter().filter(|r| r.show_date && r.date.is_some()).count()
}
