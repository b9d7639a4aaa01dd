//! Plain-text preview of the first report rows, for the console.

use crate::models::{CleanRow, OUTPUT_COLUMNS};

/// Render up to `limit` rows as an aligned text table with a header line.
pub fn render_preview(rows: &[CleanRow], limit: usize) -> String {
    let body: Vec<[String; 5]> = rows
        .iter()
        .take(limit)
        .map(|r| {
            [
                r.display_date(),
                r.display_time(),
                r.event.clone(),
                r.prior.to_string(),
                r.survey.to_string(),
            ]
        })
        .collect();

    let mut widths: [usize; 5] = OUTPUT_COLUMNS.map(|c| c.chars().count());
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &OUTPUT_COLUMNS.map(String::from), &widths);
    for cells in &body {
        push_line(&mut out, cells, &widths);
    }

    if rows.len() > limit {
        out.push_str(&format!("... {} more row(s)\n", rows.len() - limit));
    }
    out
}

fn push_line(out: &mut String, cells: &[String; 5], widths: &[usize; 5]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{:<width$}", cell, width = *w))
        .collect();
    out.push_str(line.join("  ").trim_end());
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RawRow;
    use crate::transform::clean_rows;

    #[test]
    fn test_preview_layout() {
        let rows = clean_rows(vec![
            RawRow::new("2025-03-28 08:30", "CPI", "3.1", "3.0"),
            RawRow::new("2025-03-28 10:00", "PMI", "52", "53"),
        ]);

        let text = render_preview(&rows, 5);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Date        Time   Event  Prior  Survey");
        assert_eq!(lines[1], "03/28/2025  08:30  CPI    3.1    3.0");
        assert_eq!(lines[2], "            10:00  PMI    52     53");
    }

    #[test]
    fn test_preview_truncates() {
        let rows = clean_rows(vec![
            RawRow::new("2025-03-28 08:30", "CPI", "", ""),
            RawRow::new("2025-03-28 10:00", "PMI", "", ""),
            RawRow::new("2025-03-31 09:00", "GDP", "", ""),
        ]);

        let text = render_preview(&rows, 1);
        assert_eq!(text.lines().count(), 3);
        assert!(text.ends_with("... 2 more row(s)\n"));
    }

    #[test]
    fn test_preview_empty() {
        assert_eq!(render_preview(&[], 5), "Date  Time  Event  Prior  Survey\n");
    }
}
