//! Workbook reader: source sheet → [`RawRow`]s.
//!
//! Any format calamine understands (xlsx, xls, xlsb, ods) is accepted. The
//! first non-empty row is the header row; the `Date Time`, `Event`, `Prior`
//! and `Survey` columns are picked out by name and everything else is
//! ignored.

use calamine::{open_workbook_auto, Data, Range, Reader};
use std::path::Path;

use crate::error::{ReadError, ReadResult};
use crate::models::{
    CellValue, RawRow, COL_DATE_TIME, COL_EVENT, COL_PRIOR, COL_SURVEY, REQUIRED_COLUMNS,
};
use crate::transform::timestamp::parse_timestamp_str;

/// Result of reading a workbook, with metadata
#[derive(Debug, Clone)]
pub struct SheetData {
    /// Data rows, in sheet order
    pub rows: Vec<RawRow>,
    /// Every header in the sheet, including ignored columns
    pub headers: Vec<String>,
    /// Name of the sheet that was read
    pub sheet_name: String,
    /// Fully blank rows that were skipped
    pub skipped_blank: usize,
}

/// Positions of the required columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnMap {
    date_time: usize,
    event: usize,
    prior: usize,
    survey: usize,
}

impl ColumnMap {
    fn locate(path: &Path, headers: &[String]) -> ReadResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        match (
            find(COL_DATE_TIME),
            find(COL_EVENT),
            find(COL_PRIOR),
            find(COL_SURVEY),
        ) {
            (Some(date_time), Some(event), Some(prior), Some(survey)) => Ok(Self {
                date_time,
                event,
                prior,
                survey,
            }),
            _ => Err(ReadError::MissingColumns {
                path: path.to_path_buf(),
                columns: REQUIRED_COLUMNS
                    .iter()
                    .filter(|c| find(**c).is_none())
                    .map(|c| c.to_string())
                    .collect(),
            }),
        }
    }
}

/// Convert a calamine cell.
pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => match parse_timestamp_str(s) {
            Some(dt) => CellValue::DateTime(dt),
            None => CellValue::text(s.as_str()),
        },
        Data::DurationIso(s) => CellValue::text(s.as_str()),
    }
}

/// Read the source workbook.
///
/// Uses `sheet` when given, otherwise the first worksheet.
pub fn read_workbook(path: &Path, sheet: Option<&str>) -> ReadResult<SheetData> {
    let mut workbook = open_workbook_auto(path).map_err(|source| ReadError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let sheet_names = workbook.sheet_names();
    let sheet_name = match sheet {
        Some(name) => sheet_names
            .iter()
            .find(|n| n.as_str() == name)
            .cloned()
            .ok_or_else(|| ReadError::SheetNotFound {
                path: path.to_path_buf(),
                sheet: name.to_string(),
            })?,
        None => sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ReadError::NoSheets {
                path: path.to_path_buf(),
            })?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|source| ReadError::Sheet {
            path: path.to_path_buf(),
            sheet: sheet_name.clone(),
            source,
        })?;

    let (rows, headers, skipped_blank) = extract_rows(path, &range)?;
    Ok(SheetData {
        rows,
        headers,
        sheet_name,
        skipped_blank,
    })
}

/// Pull the header and data rows out of a worksheet range.
fn extract_rows(path: &Path, range: &Range<Data>) -> ReadResult<(Vec<RawRow>, Vec<String>, usize)> {
    let mut iter = range
        .rows()
        .skip_while(|row| row.iter().all(|c| matches!(c, Data::Empty)));

    let headers: Vec<String> = iter
        .next()
        .ok_or_else(|| ReadError::EmptySheet {
            path: path.to_path_buf(),
        })?
        .iter()
        .map(|c| cell_value(c).to_string().trim().to_string())
        .collect();

    let columns = ColumnMap::locate(path, &headers)?;
    let get = |row: &[Data], i: usize| row.get(i).map(cell_value).unwrap_or_default();

    let mut rows = Vec::new();
    let mut skipped_blank = 0;
    for row in iter {
        let raw = RawRow {
            date_time: get(row, columns.date_time),
            event: get(row, columns.event).to_string(),
            prior: get(row, columns.prior),
            survey: get(row, columns.survey),
        };

        if raw.is_blank() {
            skipped_blank += 1;
            continue;
        }
        rows.push(raw);
    }

    Ok((rows, headers, skipped_blank))
}

/// Display path for messages.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
    use tempfile::TempDir;

    fn write_fixture(path: &Path) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Calendar").unwrap();

        let date_format = Format::new().set_num_format("yyyy-mm-dd hh:mm");
        let headers = ["Country", "Date Time", "Event", "Prior", "Survey", "Actual"];
        for (col, h) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *h).unwrap();
        }

        let when = ExcelDateTime::parse_from_str("2025-03-31 09:00:00").unwrap();
        sheet.write_string(1, 0, "US").unwrap();
        sheet.write_datetime_with_format(1, 1, &when, &date_format).unwrap();
        sheet.write_string(1, 2, "GDP").unwrap();
        sheet.write_number(1, 3, 2.0).unwrap();
        sheet.write_string(1, 4, "2.1%").unwrap();

        sheet.write_string(2, 0, "US").unwrap();
        sheet.write_string(2, 1, "2025-03-28 08:30").unwrap();
        sheet.write_string(2, 2, "CPI").unwrap();
        sheet.write_number(2, 3, 3.1).unwrap();
        sheet.write_number(2, 4, 3.0).unwrap();

        // Row 3 left blank on purpose
        sheet.write_string(4, 1, "TBD").unwrap();
        sheet.write_string(4, 2, "Fed Speaker").unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_read_fixture() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("2025-03-28 EOW.xlsx");
        write_fixture(&path);

        let data = read_workbook(&path, None).unwrap();
        assert_eq!(data.sheet_name, "Calendar");
        assert_eq!(data.headers.len(), 6);
        assert_eq!(data.rows.len(), 3);
        assert_eq!(data.skipped_blank, 1);

        let gdp = &data.rows[0];
        assert_eq!(gdp.event, "GDP");
        assert_eq!(
            gdp.date_time,
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2025, 3, 31)
                    .unwrap()
                    .and_hms_opt(9, 0, 0)
                    .unwrap()
            )
        );
        assert_eq!(gdp.prior, CellValue::Number(2.0));
        assert_eq!(gdp.survey, CellValue::Text("2.1%".into()));

        assert_eq!(data.rows[1].date_time, CellValue::Text("2025-03-28 08:30".into()));
        assert_eq!(data.rows[2].prior, CellValue::Empty);
    }

    #[test]
    fn test_named_sheet_missing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("EOW.xlsx");
        write_fixture(&path);

        let err = read_workbook(&path, Some("Summary")).unwrap_err();
        assert!(matches!(err, ReadError::SheetNotFound { .. }));
    }

    #[test]
    fn test_missing_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("EOW.xlsx");

        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Date Time").unwrap();
        sheet.write_string(0, 1, "Event").unwrap();
        workbook.save(&path).unwrap();

        let err = read_workbook(&path, None).unwrap_err();
        match err {
            ReadError::MissingColumns { columns, .. } => {
                assert_eq!(columns, vec!["Prior", "Survey"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unreadable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("EOW.xlsx");
        std::fs::write(&path, b"not a workbook").unwrap();

        let err = read_workbook(&path, None).unwrap_err();
        assert!(matches!(err, ReadError::Open { .. }));
        assert!(err.to_string().contains("EOW.xlsx"));
    }

    #[test]
    fn test_cell_conversion() {
        assert_eq!(cell_value(&Data::Int(52)), CellValue::Number(52.0));
        assert_eq!(cell_value(&Data::String(String::new())), CellValue::Empty);
        assert_eq!(cell_value(&Data::String(" 3.0% ".into())), CellValue::Text(" 3.0% ".into()));
        assert_eq!(
            cell_value(&Data::DateTimeIso("2025-03-28T08:30:00".into())),
            CellValue::DateTime(
                NaiveDate::from_ymd_opt(2025, 3, 28)
                    .unwrap()
                    .and_hms_opt(8, 30, 0)
                    .unwrap()
            )
        );
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/data/2025-03-28 EOW.xlsx")), "2025-03-28 EOW.xlsx");
    }
}
