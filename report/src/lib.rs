//! # EOW Report - weekly economic calendar cleanup
//!
//! Finds the newest end-of-week ("EOW") spreadsheet export in a directory,
//! splits its combined `Date Time` column, sorts the events and writes a
//! formatted report where repeated dates are shown once.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Discovery  │────▶│   Parser    │────▶│  Transform  │────▶│   Writer    │
//! │ *EOW*.xlsx  │     │ (calamine)  │     │ sort/group  │     │  (xlsx +    │
//! │  newest     │     │             │     │             │     │   preview)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use eow_report::{run, ReportOptions};
//!
//! let options = ReportOptions {
//!     input_dir: "/mnt/trading/This Week In Markets".into(),
//!     ..Default::default()
//! };
//! let summary = run(&options).unwrap();
//! println!("{} rows", summary.rows.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per pipeline stage
//! - [`models`] - Cell values and row types
//! - [`discovery`] - Newest matching input file
//! - [`parser`] - Source workbook reader
//! - [`transform`] - Timestamp parsing, sorting, date grouping and the pipeline
//! - [`writer`] - Formatted report and console preview
//! - [`config`] - Run options
//! - [`logs`] - Progress logging

// Core modules
pub mod error;
pub mod models;

// Input
pub mod discovery;
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// Options and logging
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, DiscoveryError, ReadError, ReportError, WriteError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{CellValue, CleanRow, DisplayRow, RawRow};

// =============================================================================
// Re-exports - Discovery & Parsing
// =============================================================================

pub use discovery::{find_latest_file, list_candidates, Candidate};
pub use parser::{read_workbook, SheetData};

// =============================================================================
// Re-exports - Transform & Pipeline
// =============================================================================

pub use transform::{
    clean_rows,
    clean_rows_with_stats,
    raw_rows_from_display,
    to_display_rows,
    run,
    run_file,
    RunSummary,
    TransformStats,
};

// =============================================================================
// Re-exports - Output & Config
// =============================================================================

pub use config::{OptionOverrides, ReportOptions};
pub use writer::{render_preview, write_report, ReportStyle};
