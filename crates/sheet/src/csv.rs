use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::sheet::Sheet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV reader options
#[derive(Debug, Clone)]
pub struct CsvOptions {
    /// Field delimiter (default: ',')
    pub delimiter: u8,
    /// Quote character (default: '"')
    pub quote: u8,
    /// Whether to use type inference when reading
    pub infer_types: bool,
}

impl Default for CsvOptions {
    fn default() -> Self {
        CsvOptions {
            delimiter: b',',
            quote: b'"',
            infer_types: true,
        }
    }
}

impl CsvOptions {
    /// Create options for TSV (tab-separated values)
    #[must_use]
    pub fn tsv() -> Self {
        CsvOptions {
            delimiter: b'\t',
            ..Default::default()
        }
    }

    /// Set whether to infer types
    #[must_use]
    pub fn with_type_inference(mut self, infer_types: bool) -> Self {
        self.infer_types = infer_types;
        self
    }
}

impl Sheet {
    /// Load a sheet from a CSV file
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::from_csv_with_options(path, CsvOptions::default())
    }

    /// Load a sheet from a CSV file with custom options
    pub fn from_csv_with_options<P: AsRef<Path>>(path: P, options: CsvOptions) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SheetError::source_unavailable(path, e))?;
        Self::from_csv_reader(BufReader::new(file), options)
    }

    /// Load a sheet from a CSV string
    pub fn from_csv_str(content: &str) -> Result<Self> {
        Self::from_csv_reader(content.as_bytes(), CsvOptions::default())
    }

    /// Load a sheet from a reader.
    ///
    /// Every line, including the first, becomes a row; rows may differ in
    /// length. With type inference off, empty fields are still read as null.
    pub fn from_csv_reader<R: Read>(reader: R, options: CsvOptions) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .delimiter(options.delimiter)
            .quote(options.quote)
            .has_headers(false) // The header row is normalized like any other row
            .flexible(true)
            .from_reader(reader);

        let mut sheet = Sheet::with_name("Sheet1");

        for result in csv_reader.records() {
            let record = result?;
            let row: Vec<CellValue> = record
                .iter()
                .map(|field| {
                    if options.infer_types {
                        CellValue::parse(field)
                    } else if field.is_empty() {
                        CellValue::Null
                    } else {
                        CellValue::String(field.to_string())
                    }
                })
                .collect();
            sheet.row_append(row);
        }

        Ok(sheet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::NormalizeOptions;
    use tempfile::tempdir;

    #[test]
    fn test_csv_infers_types() {
        let sheet = Sheet::from_csv_str("id,player_elo_after,active\nm1,1500,true\n").unwrap();

        assert_eq!(sheet.row_count(), 2);
        assert_eq!(sheet.row(1).unwrap()[1], CellValue::Int(1500));
        assert_eq!(sheet.row(1).unwrap()[2], CellValue::Bool(true));
    }

    #[test]
    fn test_csv_ragged_rows_normalize() {
        let sheet = Sheet::from_csv_str("id,player_name,score\nm3,,\nm4\n,,\n").unwrap();

        let records = sheet.normalize(&NormalizeOptions::default());

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[1].get("id"), Some(&CellValue::from("m4")));
    }

    #[test]
    fn test_csv_without_inference_keeps_text() {
        let options = CsvOptions::default().with_type_inference(false);
        let sheet = Sheet::from_csv_reader("a,b\n\"1,500\",\n".as_bytes(), options).unwrap();

        let row = sheet.row(1).unwrap();
        assert_eq!(row[0], CellValue::from("1,500"));
        assert_eq!(row[1], CellValue::Null);
    }

    #[test]
    fn test_tsv_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.tsv");
        std::fs::write(&path, "player_name\twins\nAlice\t3\n").unwrap();

        let sheet = Sheet::from_csv_with_options(&path, CsvOptions::tsv()).unwrap();
        assert_eq!(sheet.row(1).unwrap()[1], CellValue::Int(3));
    }

    #[test]
    fn test_missing_csv_is_source_unavailable() {
        let result = Sheet::from_csv("/definitely/not/here.csv");
        assert!(matches!(result, Err(SheetError::SourceUnavailable { .. })));
    }
}
