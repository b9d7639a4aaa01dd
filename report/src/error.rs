//! Error types for the EOW report pipeline.
//!
//! One enum per stage of the pipeline:
//!
//! - [`DiscoveryError`] - locating the newest EOW export
//! - [`ReadError`] - opening and reading the source workbook
//! - [`WriteError`] - writing the formatted report
//! - [`ConfigError`] - loading and checking [`crate::config::ReportOptions`]
//! - [`ReportError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every variant that touches
//! the filesystem carries the offending path.
//!
//! Unparseable timestamps are not errors: the row keeps a null date/time and
//! is counted in [`crate::transform::TransformStats`].

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Discovery Errors
// =============================================================================

/// Errors while looking for the input file.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    /// The search directory is missing or not a directory.
    #[error("Input directory not found: {}", dir.display())]
    DirectoryNotFound { dir: PathBuf },

    /// No file matched the discovery pattern.
    #[error("No files matching the pattern {pattern} were found in {}", dir.display())]
    NotFound { pattern: String, dir: PathBuf },

    /// The generated glob pattern was rejected.
    #[error("Invalid file pattern '{pattern}': {message}")]
    Pattern { pattern: String, message: String },

    /// Reading directory entries or file metadata failed.
    #[error("Cannot read metadata for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while reading the source workbook.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The workbook could not be opened.
    #[error("Failed to open workbook {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: calamine::Error,
    },

    /// The workbook has no worksheets.
    #[error("Workbook {} contains no sheets", path.display())]
    NoSheets { path: PathBuf },

    /// The requested worksheet does not exist.
    #[error("Sheet '{sheet}' not found in {}", path.display())]
    SheetNotFound { path: PathBuf, sheet: String },

    /// The worksheet exists but could not be decoded.
    #[error("Failed to read sheet '{sheet}' in {}: {source}", path.display())]
    Sheet {
        path: PathBuf,
        sheet: String,
        #[source]
        source: calamine::Error,
    },

    /// No header row.
    #[error("Sheet in {} is empty", path.display())]
    EmptySheet { path: PathBuf },

    /// Required input columns are absent.
    #[error("Missing column(s) {} in {}", columns.join(", "), path.display())]
    MissingColumns { path: PathBuf, columns: Vec<String> },
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while writing the report workbook.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Building the worksheet failed.
    #[error("Failed to build report for {}: {source}", path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Saving the workbook to disk failed.
    #[error("Failed to save report to {}: {source}", path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// The output directory could not be created.
    #[error("Cannot create output directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors from loading or checking options.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("Cannot read config file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON for [`crate::config::ReportOptions`].
    #[error("Invalid config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An option has an unusable value.
    #[error("Invalid value for option '{option}': {message}")]
    InvalidOption { option: String, message: String },
}

// =============================================================================
// Report Errors (top-level)
// =============================================================================

/// Top-level pipeline errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run`].
#[derive(Debug, Error)]
pub enum ReportError {
    /// Input discovery error.
    #[error("{0}")]
    Discovery(#[from] DiscoveryError),

    /// Source workbook error.
    #[error("{0}")]
    Read(#[from] ReadError),

    /// Output workbook error.
    #[error("{0}")]
    Write(#[from] WriteError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for discovery operations.
pub type DiscoveryResult<T> = Result<T, DiscoveryError>;

/// Result type for workbook reads.
pub type ReadResult<T> = Result<T, ReadError>;

/// Result type for report writes.
pub type WriteResult<T> = Result<T, WriteError>;

/// Result type for configuration.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for the whole pipeline.
pub type ReportResult<T> = Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // DiscoveryError -> ReportError
        let err = DiscoveryError::NotFound {
            pattern: "/data/weekly/*EOW*.xlsx".into(),
            dir: PathBuf::from("/data/weekly"),
        };
        let report_err: ReportError = err.into();
        let msg = report_err.to_string();
        assert!(msg.contains("*EOW*.xlsx"));
        assert!(msg.contains("/data/weekly"));

        // ReadError -> ReportError
        let err = ReadError::EmptySheet {
            path: PathBuf::from("in.xlsx"),
        };
        let report_err: ReportError = err.into();
        assert!(report_err.to_string().contains("in.xlsx"));
    }

    #[test]
    fn test_missing_columns_format() {
        let err = ReadError::MissingColumns {
            path: PathBuf::from("week.xlsx"),
            columns: vec!["Prior".into(), "Survey".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Prior, Survey"));
        assert!(msg.contains("week.xlsx"));
    }

    #[test]
    fn test_invalid_option_format() {
        let err = ConfigError::InvalidOption {
            option: "token".into(),
            message: "must not be empty".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("token"));
        assert!(msg.contains("must not be empty"));
    }
}
