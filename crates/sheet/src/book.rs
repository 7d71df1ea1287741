use crate::document::Document;
use crate::error::{Result, SheetError};
use crate::sheet::{NormalizeOptions, Sheet};
use indexmap::IndexMap;
use std::path::Path;

/// A book containing multiple sheets (preserves insertion order)
#[derive(Debug, Clone)]
pub struct Book {
    name: String,
    sheets: IndexMap<String, Sheet>,
}

impl Book {
    /// Create a new empty book
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Book1")
    }

    /// Create a new empty book with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Book {
            name: name.to_string(),
            sheets: IndexMap::new(),
        }
    }

    /// Get the book name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the number of sheets
    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Check if a sheet exists
    #[must_use]
    pub fn has_sheet(&self, name: &str) -> bool {
        self.sheets.contains_key(name)
    }

    /// Get a sheet by name
    pub fn get_sheet(&self, name: &str) -> Result<&Sheet> {
        self.sheets.get(name).ok_or_else(|| SheetError::SheetNotFound {
            name: name.to_string(),
        })
    }

    /// Add a sheet to the book
    pub fn add_sheet(&mut self, name: &str, sheet: Sheet) -> Result<()> {
        if self.sheets.contains_key(name) {
            return Err(SheetError::SheetAlreadyExists {
                name: name.to_string(),
            });
        }

        let mut sheet = sheet;
        sheet.set_name(name);
        self.sheets.insert(name.to_string(), sheet);
        Ok(())
    }

    /// Merge another book into this one.
    /// Sheets with conflicting names are renamed with a `_1`, `_2`, ... suffix.
    pub fn merge(&mut self, other: Book) {
        for (name, mut sheet) in other.sheets {
            let final_name = get_unique_name(self, &name);
            sheet.set_name(&final_name);
            self.sheets.insert(final_name, sheet);
        }
    }

    // ===== Normalization =====

    /// Normalize every sheet into the interchange document, in book order
    #[must_use]
    pub fn to_document(&self, options: &NormalizeOptions) -> Document {
        let mut doc = Document::new();
        for (name, sheet) in &self.sheets {
            let records = sheet.normalize(options);
            tracing::info!(sheet = %name, rows = records.len(), "normalized sheet");
            doc.insert_sheet(name, records);
        }
        doc
    }

    // ===== Multi-File Loading =====

    /// Load several sources into a single book.
    ///
    /// Workbook files (xlsx, xlsm, xls, ods) contribute all of their sheets;
    /// CSV/TSV files contribute one sheet named after the file stem. Clashing
    /// names get a numeric suffix.
    ///
    /// # Example
    /// ```no_run
    /// use matchbook_sheet::Book;
    ///
    /// let book = Book::from_files(&["S4LeagueAutomatisierung.xlsx", "extra.csv"]).unwrap();
    /// ```
    pub fn from_files<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut book = Book::new();

        for path in paths {
            book.merge(load_book_by_extension(path.as_ref())?);
        }

        Ok(book)
    }
}

/// Load a source by auto-detecting its format from the file extension
fn load_book_by_extension(path: &Path) -> Result<Book> {
    use crate::csv::CsvOptions;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Book::from_workbook(path),
        "csv" | "tsv" => {
            let options = if ext == "tsv" {
                CsvOptions::tsv()
            } else {
                CsvOptions::default()
            };
            let sheet_name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| {
                    SheetError::Parse(format!("Invalid filename: {}", path.display()))
                })?
                .to_string();

            let mut book = Book::new();
            book.add_sheet(&sheet_name, Sheet::from_csv_with_options(path, options)?)?;
            Ok(book)
        }
        _ => Err(SheetError::Parse(format!(
            "Unsupported file format: '{ext}'. Supported: xlsx, xlsm, xlsb, xls, ods, csv, tsv"
        ))),
    }
}

/// Generate a unique sheet name by appending _1, _2, etc.
fn get_unique_name(book: &Book, base_name: &str) -> String {
    if !book.has_sheet(base_name) {
        return base_name.to_string();
    }
    let mut suffix = 1;
    loop {
        let new_name = format!("{base_name}_{suffix}");
        if !book.has_sheet(&new_name) {
            return new_name;
        }
        suffix += 1;
    }
}

impl Default for Book {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::CellValue;

    #[test]
    fn test_add_sheet_rejects_duplicates() {
        let mut book = Book::new();
        book.add_sheet("Data", Sheet::new()).unwrap();

        let result = book.add_sheet("Data", Sheet::new());
        assert!(matches!(result, Err(SheetError::SheetAlreadyExists { .. })));
        assert_eq!(book.get_sheet("Data").unwrap().name(), "Data");
    }

    #[test]
    fn test_merge_renames_conflicts() {
        let mut book = Book::new();
        book.add_sheet("Data", Sheet::new()).unwrap();

        let mut other = Book::new();
        other.add_sheet("Data", Sheet::new()).unwrap();
        other.add_sheet("Other", Sheet::new()).unwrap();

        book.merge(other);

        assert_eq!(book.sheet_names(), vec!["Data", "Data_1", "Other"]);
        assert_eq!(book.get_sheet("Data_1").unwrap().name(), "Data_1");
    }

    #[test]
    fn test_to_document_keeps_sheet_order() {
        let mut book = Book::new();
        book.add_sheet(
            "Player_Stats_All_Time",
            Sheet::from_data(vec![vec!["player_name", "wins"], vec!["Alice", "3"]]),
        )
        .unwrap();
        book.add_sheet("Notes", Sheet::from_data(vec![vec!["note"]]))
            .unwrap();

        let doc = book.to_document(&NormalizeOptions::default());

        assert_eq!(doc.sheet_names(), vec!["Player_Stats_All_Time", "Notes"]);
        assert_eq!(doc.records("Notes").unwrap().len(), 0);
        let stats = &doc.records("Player_Stats_All_Time").unwrap()[0];
        assert_eq!(stats.get("wins"), Some(&CellValue::from("3")));
    }

    #[test]
    fn test_from_files_rejects_unknown_extension() {
        let result = Book::from_files(&["data.parquet"]);
        assert!(matches!(result, Err(SheetError::Parse(_))));
    }
}
