//! XLSX load/save behind the in-memory model.
//!
//! Loading goes through `calamine` (which also accepts xls/xlsb/ods);
//! persistence goes through `rust_xlsxwriter`. The document is modeled at the
//! value level: cells round-trip as display text.

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::Workbook as XlsxWorkbook;

use crate::book::Book;
use crate::error::{Result, WorkbookError};

/// Load a spreadsheet file into a [`Book`].
///
/// Cell values are normalized to display text; empty cells are skipped so the
/// sparse model stays sparse. The returned book is clean (not dirty).
pub fn load(path: &Path) -> Result<Book> {
    let mut workbook = open_workbook_auto(path).map_err(|e| WorkbookError::Load {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names: Vec<String> = workbook.sheet_names().to_vec();
    let mut book = Book::new();

    for name in &sheet_names {
        let range = workbook
            .worksheet_range(name)
            .map_err(|e| WorkbookError::Load {
                path: path.to_path_buf(),
                message: format!("failed to read sheet '{name}': {e}"),
            })?;

        let sheet = book.add_sheet(name.clone());

        // Data may not begin at A1; offset by the range origin.
        let (start_row, start_col) = range.start().unwrap_or((0, 0));

        for (row_idx, row) in range.rows().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                if matches!(cell, Data::Empty) {
                    continue;
                }
                sheet.set_value(
                    start_row + row_idx as u32,
                    start_col + col_idx as u32,
                    data_to_text(cell),
                );
            }
        }
    }

    Ok(book)
}

/// Persist a [`Book`] to an XLSX file, replacing the file's contents.
pub fn save(book: &Book, path: &Path) -> Result<()> {
    let mut xlsx = XlsxWorkbook::new();

    for sheet in book.sheets() {
        let worksheet = xlsx
            .add_worksheet()
            .set_name(sheet.name())
            .map_err(|e| WorkbookError::Save {
                path: path.to_path_buf(),
                message: format!("failed to create sheet '{}': {e}", sheet.name()),
            })?;

        for (&(row, col), value) in sheet.cells() {
            let col16 = u16::try_from(col).map_err(|_| WorkbookError::Save {
                path: path.to_path_buf(),
                message: format!("column index {col} out of range"),
            })?;
            worksheet
                .write_string(row, col16, value)
                .map_err(|e| WorkbookError::Save {
                    path: path.to_path_buf(),
                    message: format!(
                        "failed to write cell ({row}, {col}) on '{}': {e}",
                        sheet.name()
                    ),
                })?;
        }
    }

    xlsx.save(path).map_err(|e| WorkbookError::Save {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Normalize a calamine cell to display text.
fn data_to_text(data: &Data) -> String {
    match data {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => {
            // Whole floats render without the trailing ".0" users never typed.
            if f.fract() == 0.0 && f.abs() < 1e15 {
                format!("{}", *f as i64)
            } else {
                f.to_string()
            }
        }
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::Error(e) => format!("#{e:?}"),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample_book() -> Book {
        let mut book = Book::new();
        let s1 = book.add_sheet("Sheet1");
        s1.set_value(0, 0, "Name");
        s1.set_value(0, 1, "Age");
        s1.set_value(1, 0, "Alice");
        s1.set_value(1, 1, "30");
        book.add_sheet("Sheet2").set_value(4, 3, "corner");
        book
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.xlsx");

        save(&sample_book(), &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded.sheet_names(), vec!["Sheet1", "Sheet2"]);

        let s1 = loaded.sheet("Sheet1").unwrap();
        assert_eq!(s1.value(0, 0), "Name");
        assert_eq!(s1.value(1, 1), "30");

        let s2 = loaded.sheet("Sheet2").unwrap();
        assert_eq!(s2.value(4, 3), "corner");
        assert_eq!(s2.value(0, 0), "");
    }

    #[test]
    fn test_loaded_book_is_clean() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("clean.xlsx");

        save(&sample_book(), &path).unwrap();
        let loaded = load(&path).unwrap();
        assert!(!loaded.is_dirty());
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.xlsx");
        assert!(matches!(load(&path), Err(WorkbookError::Load { .. })));
    }

    #[test]
    fn test_data_to_text_normalization() {
        assert_eq!(data_to_text(&Data::String("x".into())), "x");
        assert_eq!(data_to_text(&Data::Float(30.0)), "30");
        assert_eq!(data_to_text(&Data::Float(2.5)), "2.5");
        assert_eq!(data_to_text(&Data::Int(-7)), "-7");
        assert_eq!(data_to_text(&Data::Bool(true)), "TRUE");
        assert_eq!(data_to_text(&Data::Empty), "");
    }
}
