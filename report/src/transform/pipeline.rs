//! High-level pipeline: find → read → transform → write.
//!
//! # Example
//!
//! ```rust,ignore
//! use eow_report::{run, ReportOptions};
//!
//! let options = ReportOptions {
//!     input_dir: "/mnt/trading/This Week In Markets".into(),
//!     ..Default::default()
//! };
//! let result = run(&options)?;
//! println!("{} rows written to {:?}", result.rows.len(), result.output);
//! ```

use serde::Serialize;
use std::path::{Path, PathBuf};

use super::cleaner::{clean_rows_with_stats, TransformStats};
use crate::config::ReportOptions;
use crate::discovery::{file_pattern, find_latest_file};
use crate::error::ReportResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::CleanRow;
use crate::parser::{display_name, read_workbook};
use crate::writer::write_report;

/// Result of a complete pipeline run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    /// Workbook the rows were read from
    pub input: PathBuf,

    /// Report path; `None` on a dry run
    pub output: Option<PathBuf>,

    /// Source sheet that was read
    pub sheet_name: String,

    /// All headers of the source sheet
    pub headers: Vec<String>,

    /// Transformed rows, in report order
    pub rows: Vec<CleanRow>,

    pub stats: TransformStats,
}

/// Run the whole pipeline with the given options.
pub fn run(options: &ReportOptions) -> ReportResult<RunSummary> {
    let options = options.clone().validate()?;

    // Step 1: locate the input
    let input = resolve_input(&options)?;
    log_success(format!("Using input file: {}", input.display()));

    // Step 2: read
    log_info(format!("📖 Reading {}...", display_name(&input)));
    let sheet = read_workbook(&input, options.sheet.as_deref())?;
    log_success(format!(
        "Read {} rows from sheet '{}'",
        sheet.rows.len(),
        sheet.sheet_name
    ));
    log_info(format!("Original columns: {}", sheet.headers.join(", ")));
    if sheet.skipped_blank > 0 {
        log_info_indent(format!("{} blank rows skipped", sheet.skipped_blank), 1);
    }

    // Step 3: transform
    log_info("⚙️  Splitting Date Time, sorting and grouping dates...");
    let (rows, stats) = clean_rows_with_stats(sheet.rows);
    if stats.unparsed > 0 {
        log_warning(format!(
            "{} of {} timestamps could not be parsed (date and time left blank)",
            stats.unparsed, stats.total
        ));
    }
    log_success(format!("{} rows across {} dates", stats.total, stats.date_groups));

    // Step 4: write
    let output = if options.dry_run {
        log_info("(dry run, report not written)");
        None
    } else {
        let path = options.resolve_output_path();
        write_report(&rows, &path, &options.style())?;
        log_success(format!("Clean report with formatting saved to '{}'", path.display()));
        Some(path)
    };

    Ok(RunSummary {
        input,
        output,
        sheet_name: sheet.sheet_name,
        headers: sheet.headers,
        rows,
        stats,
    })
}

/// Explicit input file, or the newest match in the input directory.
fn resolve_input(options: &ReportOptions) -> ReportResult<PathBuf> {
    if let Some(ref file) = options.input_file {
        log_info(format!("Using provided input file: {}", file.display()));
        return Ok(file.clone());
    }

    log_info(format!(
        "🔎 Looking for {}",
        file_pattern(&options.input_dir, &options.token, &options.extension)
    ));
    Ok(find_latest_file(
        &options.input_dir,
        &options.token,
        &options.extension,
    )?)
}

/// Run on a single file, skipping discovery.
pub fn run_file(input: &Path, options: &ReportOptions) -> ReportResult<RunSummary> {
    let options = ReportOptions {
        input_file: Some(input.to_path_buf()),
        ..options.clone()
    };
    run(&options)
}
