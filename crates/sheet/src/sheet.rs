use crate::cell::CellValue;
use crate::error::{Result, SheetError};
use crate::record::Record;

/// Rule deciding whether a normalized row carries enough content to keep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ContentRule {
    /// Keep a row with at least one present (non-null) field.
    #[default]
    Present,
    /// Keep a row only if some field is truthy; zero, `false` and the empty
    /// string count as no content.
    Truthy,
}

impl ContentRule {
    /// Whether `record` passes this rule
    #[must_use]
    pub fn keeps(self, record: &Record) -> bool {
        match self {
            ContentRule::Present => !record.is_empty(),
            ContentRule::Truthy => record.values().any(CellValue::is_truthy),
        }
    }
}

/// Options for normalizing a sheet into records
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    pub content_rule: ContentRule,
}

impl NormalizeOptions {
    /// Set the row content rule
    #[must_use]
    pub fn with_content_rule(mut self, content_rule: ContentRule) -> Self {
        self.content_rule = content_rule;
        self
    }
}

/// A sheet representing a 2D grid of cells (row-major storage).
///
/// Rows may be ragged; row 0 is the header row when the sheet is normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    name: String,
    data: Vec<Vec<CellValue>>,
}

impl Sheet {
    /// Create a new empty sheet
    #[must_use]
    pub fn new() -> Self {
        Self::with_name("Sheet1")
    }

    /// Create a new empty sheet with a name
    #[must_use]
    pub fn with_name(name: &str) -> Self {
        Sheet {
            name: name.to_string(),
            data: Vec::new(),
        }
    }

    /// Create a sheet from a 2D vector of values
    #[must_use]
    pub fn from_data<T: Into<CellValue>>(data: Vec<Vec<T>>) -> Self {
        let converted: Vec<Vec<CellValue>> = data
            .into_iter()
            .map(|row| row.into_iter().map(Into::into).collect())
            .collect();

        Sheet {
            name: "Sheet1".to_string(),
            data: converted,
        }
    }

    /// Get the sheet name
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the sheet name
    pub fn set_name(&mut self, name: &str) {
        self.name = name.to_string();
    }

    /// Get the number of rows, header included
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// Get a row by index
    pub fn row(&self, index: usize) -> Result<&Vec<CellValue>> {
        self.data.get(index).ok_or(SheetError::RowIndexOutOfBounds {
            index,
            count: self.data.len(),
        })
    }

    /// Append a row; rows may differ in length
    pub fn row_append<T: Into<CellValue>>(&mut self, row: Vec<T>) {
        self.data.push(row.into_iter().map(Into::into).collect());
    }

    /// Get mutable access to the underlying data
    pub fn data_mut(&mut self) -> &mut Vec<Vec<CellValue>> {
        &mut self.data
    }

    // ===== Normalization =====

    /// Field names derived from the header row, one slot per header column.
    ///
    /// `None` marks a column without a usable name; that column is ignored for
    /// every data row.
    #[must_use]
    pub fn field_names(&self) -> Vec<Option<String>> {
        self.data
            .first()
            .map(|header| header.iter().map(CellValue::field_name).collect())
            .unwrap_or_default()
    }

    /// Convert the data rows into records keyed by the header row.
    ///
    /// A row is read up to the header width; extra cells are ignored and
    /// missing trailing cells count as absent. Absent cells never become
    /// fields, and a row left with no content under `options.content_rule`
    /// is dropped.
    ///
    /// # Example
    /// ```
    /// use matchbook_sheet::{CellValue, NormalizeOptions, Sheet};
    ///
    /// let sheet = Sheet::from_data(vec![
    ///     vec![CellValue::from("id"), CellValue::from("player_name")],
    ///     vec![CellValue::from("m1"), CellValue::Null],
    ///     vec![CellValue::Null, CellValue::Null],
    /// ]);
    ///
    /// let records = sheet.normalize(&NormalizeOptions::default());
    /// assert_eq!(records.len(), 1);
    /// assert_eq!(records[0].get("id"), Some(&CellValue::from("m1")));
    /// assert!(records[0].get("player_name").is_none());
    /// ```
    #[must_use]
    pub fn normalize(&self, options: &NormalizeOptions) -> Vec<Record> {
        let fields = self.field_names();

        self.data
            .iter()
            .skip(1)
            .filter_map(|row| {
                let record: Record = fields
                    .iter()
                    .zip(row)
                    .filter_map(|(field, value)| Some((field.as_deref()?, value.clone())))
                    .collect();
                options.content_rule.keeps(&record).then_some(record)
            })
            .collect()
    }
}

impl Default for Sheet {
    fn default() -> Self {
        Self::new()
    }
}
