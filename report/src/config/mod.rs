//! Run options for the report pipeline.
//!
//! Options come from three places, later ones winning:
//! built-in defaults, an optional JSON config file, then command-line flags
//! (which may themselves be filled from `EOW_*` environment variables).
//!
//! ```json
//! {
//!   "inputDir": "/mnt/trading/This Week In Markets",
//!   "output": "reports/",
//!   "title": "This Week In Markets"
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use crate::discovery::{DEFAULT_EXTENSION, DEFAULT_TOKEN};
use crate::error::{ConfigError, ConfigResult};
use crate::writer::{ReportStyle, DEFAULT_SHEET_NAME};

/// Report file name used when no output file is given.
pub const DEFAULT_OUTPUT_NAME: &str = "clean_report.xlsx";

/// Options for one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportOptions {
    /// Directory searched for EOW exports
    pub input_dir: PathBuf,

    /// Use this file instead of searching `input_dir`
    pub input_file: Option<PathBuf>,

    /// Substring the file name must contain
    pub token: String,

    /// Required file extension (without the dot)
    pub extension: String,

    /// Source sheet; the first sheet when unset
    pub sheet: Option<String>,

    /// Output file or directory
    pub output: Option<PathBuf>,

    /// Banner text above the header row
    pub title: Option<String>,

    /// Name of the report worksheet
    pub sheet_name: String,

    /// Rows shown in the console preview
    pub preview_rows: usize,

    /// Transform without writing the report
    pub dry_run: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            input_file: None,
            token: DEFAULT_TOKEN.to_string(),
            extension: DEFAULT_EXTENSION.to_string(),
            sheet: None,
            output: None,
            title: None,
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            preview_rows: 5,
            dry_run: false,
        }
    }
}

/// Values given on the command line (or through `EOW_*` variables).
///
/// `None` leaves the loaded value alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionOverrides {
    pub input_dir: Option<PathBuf>,
    pub input_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub token: Option<String>,
    pub extension: Option<String>,
    pub sheet: Option<String>,
    pub title: Option<String>,
    pub preview_rows: Option<usize>,
    pub dry_run: bool,
}

impl ReportOptions {
    /// Defaults, or the JSON file at `config` when given.
    pub fn load(config: Option<&Path>) -> ConfigResult<Self> {
        match config {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Apply command-line values on top of these options.
    pub fn with_overrides(mut self, overrides: OptionOverrides) -> Self {
        let OptionOverrides {
            input_dir,
            input_file,
            output,
            token,
            extension,
            sheet,
            title,
            preview_rows,
            dry_run,
        } = overrides;

        if let Some(dir) = input_dir {
            self.input_dir = dir;
        }
        if input_file.is_some() {
            self.input_file = input_file;
        }
        if output.is_some() {
            self.output = output;
        }
        if let Some(token) = token {
            self.token = token;
        }
        if let Some(extension) = extension {
            self.extension = extension;
        }
        if sheet.is_some() {
            self.sheet = sheet;
        }
        if title.is_some() {
            self.title = title;
        }
        if let Some(n) = preview_rows {
            self.preview_rows = n;
        }
        self.dry_run |= dry_run;

        self
    }

    /// Load options from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check option values and normalise the extension.
    pub fn validate(mut self) -> ConfigResult<Self> {
        self.token = self.token.trim().to_string();
        if self.token.is_empty() {
            return Err(invalid("token", "must not be empty"));
        }

        self.extension = self.extension.trim().trim_start_matches('.').to_string();
        if self.extension.is_empty() {
            return Err(invalid("extension", "must not be empty"));
        }

        if self.sheet_name.trim().is_empty() {
            return Err(invalid("sheetName", "must not be empty"));
        }

        Ok(self)
    }

    /// Where the report will be written.
    ///
    /// - no output set: `clean_report.xlsx` in the working directory
    /// - an existing directory, or a path ending in a separator: `clean_report.xlsx` inside it
    /// - anything else: used as the file path
    pub fn resolve_output_path(&self) -> PathBuf {
        match &self.output {
            None => PathBuf::from(DEFAULT_OUTPUT_NAME),
            Some(path) if path.is_dir() || ends_with_separator(path) => path.join(DEFAULT_OUTPUT_NAME),
            Some(path) => path.clone(),
        }
    }

    pub fn style(&self) -> ReportStyle {
        ReportStyle {
            sheet_name: self.sheet_name.clone(),
            title: self.title.clone(),
        }
    }
}

fn ends_with_separator(path: &Path) -> bool {
    let s = path.as_os_str().to_string_lossy();
    s.ends_with('/') || s.ends_with(MAIN_SEPARATOR)
}

fn invalid(option: &str, message: &str) -> ConfigError {
    ConfigError::InvalidOption {
        option: option.to_string(),
        message: message.to_string(),
    }
}
