//! Transformation module.
//!
//! - Timestamp: lenient parsing of the combined `Date Time` column
//! - Cleaner: split, sort and reshape raw rows
//! - Grouper: hide repeated dates for display
//! - Pipeline: find → read → transform → write

pub mod cleaner;
pub mod grouper;
pub mod pipeline;
pub mod timestamp;

pub use cleaner::{clean_rows, clean_rows_with_stats, raw_rows_from_display, to_display_rows, TransformStats};
pub use grouper::group_dates;
pub use pipeline::{run, run_file, RunSummary};
pub use timestamp::{parse_timestamp, parse_timestamp_str};
