//! Workbook sources (xlsx, xlsm, xlsb, xls, ods) read through calamine.
//!
//! Formulas are never evaluated here: calamine returns the cached result the
//! spreadsheet service stored with the file.

use crate::book::Book;
use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use chrono::NaiveDateTime;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn format_datetime(datetime: NaiveDateTime) -> String {
    datetime.format(DATETIME_FORMAT).to_string()
}

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::number(*f),
        Data::String(s) => CellValue::String(s.clone()),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(datetime) if dt.is_datetime() => CellValue::String(format_datetime(datetime)),
            // Durations and out-of-range serials keep their day count
            _ => CellValue::number(dt.as_f64()),
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(e.to_string()),
    }
}

/// Lay a calamine range out from A1.
///
/// calamine trims the used range, so a sheet whose first value sits in C3
/// starts at C3. Padding keeps row 0 as spreadsheet row 1 and column 0 as
/// column A, which is what the header row is read from.
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<CellValue>> {
    let Some((start_row, start_col)) = range.start() else {
        return Vec::new();
    };

    let mut data: Vec<Vec<CellValue>> = vec![Vec::new(); start_row as usize];
    for row in range.rows() {
        let mut cells = vec![CellValue::Null; start_col as usize];
        cells.extend(row.iter().map(data_to_cell_value));
        data.push(cells);
    }
    data
}

fn open(path: &Path) -> Result<Sheets<BufReader<File>>> {
    open_workbook_auto(path).map_err(|e| SheetError::source_unavailable(path, e))
}

fn read_sheet(workbook: &mut Sheets<BufReader<File>>, path: &Path, name: &str) -> Result<Sheet> {
    let range = workbook
        .worksheet_range(name)
        .map_err(|e| SheetError::source_unavailable(path, format!("sheet '{name}': {e}")))?;

    let mut sheet = Sheet::with_name(name);
    *sheet.data_mut() = range_to_rows(&range);
    Ok(sheet)
}

impl Sheet {
    /// Load one named sheet from a workbook file
    ///
    /// # Errors
    ///
    /// Returns `SheetNotFound` if the workbook has no such sheet and
    /// `SourceUnavailable` if the file cannot be opened or read.
    pub fn from_workbook_sheet<P: AsRef<Path>>(path: P, sheet_name: &str) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open(path)?;

        if !workbook.sheet_names().iter().any(|n| n == sheet_name) {
            return Err(SheetError::SheetNotFound {
                name: sheet_name.to_string(),
            });
        }

        read_sheet(&mut workbook, path, sheet_name)
    }
}

impl Book {
    /// Load every sheet of a workbook file, in workbook order
    ///
    /// # Errors
    ///
    /// Returns `SourceUnavailable` if the file cannot be opened or any sheet
    /// cannot be read; no partial book is returned.
    pub fn from_workbook<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook = open(path)?;

        let book_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Book1");
        let mut book = Book::with_name(book_name);

        for sheet_name in workbook.sheet_names() {
            tracing::debug!(sheet = %sheet_name, "reading sheet");
            let sheet = read_sheet(&mut workbook, path, &sheet_name)?;
            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Get sheet names from a workbook file without loading data
    pub fn sheet_names_in<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
        Ok(open(path.as_ref())?.sheet_names())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::NormalizeOptions;
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
    use tempfile::tempdir;

    fn write_elo_workbook(path: &Path) {
        let mut workbook = Workbook::new();

        let elo = workbook.add_worksheet();
        elo.set_name("Elo_Player_All").unwrap();
        for (col, header) in ["match_id", "player_name", "player_elo_after", "date"]
            .iter()
            .enumerate()
        {
            elo.write_string(0, col as u16, *header).unwrap();
        }
        elo.write_string(1, 0, "m1").unwrap();
        elo.write_string(1, 1, "Alice").unwrap();
        elo.write_number(1, 2, 1500.0).unwrap();
        let date = ExcelDateTime::from_ymd(2024, 1, 15).unwrap();
        let date_format = Format::new().set_num_format("yyyy-mm-dd");
        elo.write_datetime_with_format(1, 3, &date, &date_format)
            .unwrap();
        elo.write_string(2, 0, "m1").unwrap();
        elo.write_string(2, 1, "Bob").unwrap();
        elo.write_number(2, 2, 1480.5).unwrap();

        let stats = workbook.add_worksheet();
        stats.set_name("Player_Stats_All_Time").unwrap();
        stats.write_string(0, 0, "player_name").unwrap();
        stats.write_string(0, 1, "wins").unwrap();
        stats.write_string(1, 0, "Alice").unwrap();
        stats.write_boolean(1, 1, true).unwrap();

        workbook.save(path).unwrap();
    }

    #[test]
    fn test_book_from_workbook_keeps_sheet_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("league.xlsx");
        write_elo_workbook(&path);

        let book = Book::from_workbook(&path).unwrap();

        assert_eq!(book.name(), "league");
        assert_eq!(
            book.sheet_names(),
            vec!["Elo_Player_All", "Player_Stats_All_Time"]
        );
        assert_eq!(
            Book::sheet_names_in(&path).unwrap(),
            vec!["Elo_Player_All", "Player_Stats_All_Time"]
        );
    }

    #[test]
    fn test_workbook_cell_types() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("types.xlsx");
        write_elo_workbook(&path);

        let sheet = Sheet::from_workbook_sheet(&path, "Elo_Player_All").unwrap();
        let records = sheet.normalize(&NormalizeOptions::default());

        assert_eq!(records.len(), 2);
        // Whole numbers come back as integers, fractions stay floats
        assert_eq!(records[0].get("player_elo_after"), Some(&CellValue::Int(1500)));
        assert_eq!(
            records[1].get("player_elo_after"),
            Some(&CellValue::Float(1480.5))
        );
        assert_eq!(
            records[0].get("date"),
            Some(&CellValue::from("2024-01-15 00:00:00"))
        );
        // Bob has no date cell at all
        assert!(records[1].get("date").is_none());
    }

    #[test]
    fn test_workbook_pads_offset_ranges() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("offset.xlsx");

        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.set_name("Data").unwrap();
        // Column A left blank: it has no header and must stay unnamed
        ws.write_string(0, 1, "id").unwrap();
        ws.write_string(0, 2, "score").unwrap();
        ws.write_string(1, 1, "m1").unwrap();
        ws.write_number(1, 2, 7.0).unwrap();
        workbook.save(&path).unwrap();

        let sheet = Sheet::from_workbook_sheet(&path, "Data").unwrap();

        assert_eq!(sheet.field_names(), vec![None, Some("id".to_string()), Some("score".to_string())]);
        let records = sheet.normalize(&NormalizeOptions::default());
        assert_eq!(records[0].fields().collect::<Vec<_>>(), vec!["id", "score"]);
    }

    #[test]
    fn test_workbook_header_below_first_row_yields_no_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("low.xlsx");

        let mut workbook = Workbook::new();
        let ws = workbook.add_worksheet();
        ws.write_string(2, 0, "id").unwrap();
        ws.write_string(3, 0, "m1").unwrap();
        workbook.save(&path).unwrap();

        let sheet = Sheet::from_workbook_sheet(&path, "Sheet1").unwrap();

        assert_eq!(sheet.row_count(), 4);
        assert!(sheet.normalize(&NormalizeOptions::default()).is_empty());
    }

    #[test]
    fn test_missing_sheet() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("league.xlsx");
        write_elo_workbook(&path);

        let result = Sheet::from_workbook_sheet(&path, "Nope");
        assert!(matches!(result, Err(SheetError::SheetNotFound { .. })));
    }

    #[test]
    fn test_unreadable_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();

        let result = Book::from_workbook(&path);
        assert!(matches!(result, Err(SheetError::SourceUnavailable { .. })));
    }
}
