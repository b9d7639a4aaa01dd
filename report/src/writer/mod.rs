//! Formatted report output.
//!
//! Layout of the single worksheet:
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │            Title banner (optional)           │  merged A:E
//! ├────────────┬───────┬─────────────┬─────┬─────┤
//! │ Date       │ Time  │ Event       │Prior│Surv.│  gray header, frozen
//! ├────────────┼───────┼─────────────┼─────┼─────┤
//! │ 03/28/2025 │ 08:30 │ CPI         │ 3.1 │ 3.0 │
//! │            │ 10:00 │ PMI         │ 52  │ 53  │
//! └────────────┴───────┴─────────────┴─────┴─────┘
//! ```

pub mod preview;

use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet, XlsxError};
use std::fs;
use std::path::Path;

use crate::error::{WriteError, WriteResult};
use crate::models::{CellValue, CleanRow, OUTPUT_COLUMNS};

pub use preview::render_preview;

/// Default worksheet name.
pub const DEFAULT_SHEET_NAME: &str = "Report";

/// Column widths for `Date, Time, Event, Prior, Survey`.
const COLUMN_WIDTHS: [f64; 5] = [12.0, 10.0, 25.0, 10.0, 10.0];

const HEADER_BACKGROUND: u32 = 0xD3D3D3;

/// Presentation settings for the report.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    pub sheet_name: String,
    /// Banner text above the header row.
    pub title: Option<String>,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            title: None,
        }
    }
}

impl ReportStyle {
    /// Zero-based row index of the header row.
    pub fn header_row(&self) -> u32 {
        if self.title.is_some() {
            1
        } else {
            0
        }
    }
}

struct ReportFormats {
    title: Format,
    header: Format,
}

impl ReportFormats {
    fn new() -> Self {
        let title = Format::new()
            .set_bold()
            .set_font_size(14)
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter);

        let header = Format::new()
            .set_bold()
            .set_text_wrap()
            .set_align(FormatAlign::Center)
            .set_align(FormatAlign::VerticalCenter)
            .set_background_color(Color::RGB(HEADER_BACKGROUND))
            .set_border(FormatBorder::Thin);

        Self { title, header }
    }
}

/// Write the report workbook to `path`.
pub fn write_report(rows: &[CleanRow], path: &Path, style: &ReportStyle) -> WriteResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(|source| WriteError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    fill_sheet(sheet, rows, style).map_err(|source| WriteError::Xlsx {
        path: path.to_path_buf(),
        source,
    })?;

    workbook.save(path).map_err(|source| WriteError::Save {
        path: path.to_path_buf(),
        source,
    })
}

fn fill_sheet(sheet: &mut Worksheet, rows: &[CleanRow], style: &ReportStyle) -> Result<(), XlsxError> {
    let formats = ReportFormats::new();
    sheet.set_name(&style.sheet_name)?;

    if let Some(ref title) = style.title {
        let last_col = (OUTPUT_COLUMNS.len() - 1) as u16;
        sheet.merge_range(0, 0, 0, last_col, title, &formats.title)?;
        sheet.set_row_height(0, 24)?;
    }

    let header_row = style.header_row();
    for (col, name) in OUTPUT_COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(header_row, col as u16, *name, &formats.header)?;
    }
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        sheet.set_column_width(col as u16, *width)?;
    }
    sheet.set_freeze_panes(header_row + 1, 0)?;

    for (i, row) in rows.iter().enumerate() {
        let r = header_row + 1 + i as u32;
        write_text(sheet, r, 0, &row.display_date())?;
        write_text(sheet, r, 1, &row.display_time())?;
        write_text(sheet, r, 2, &row.event)?;
        write_cell(sheet, r, 3, &row.prior)?;
        write_cell(sheet, r, 4, &row.survey)?;
    }

    Ok(())
}

fn write_text(sheet: &mut Worksheet, row: u32, col: u16, text: &str) -> Result<(), XlsxError> {
    if !text.is_empty() {
        sheet.write_string(row, col, text)?;
    }
    Ok(())
}

fn write_cell(sheet: &mut Worksheet, row: u32, col: u16, value: &CellValue) -> Result<(), XlsxError> {
    match value {
        CellValue::Empty => {}
        CellValue::Number(n) => {
            sheet.write_number(row, col, *n)?;
        }
        CellValue::Bool(b) => {
            sheet.write_boolean(row, col, *b)?;
        }
        CellValue::Text(_) | CellValue::DateTime(_) => {
            sheet.write_string(row, col, value.to_string())?;
        }
    }
    Ok(())
}
