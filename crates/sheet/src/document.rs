use crate::error::{Result, SheetError};
use crate::record::Record;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The converted interchange structure: sheet name -> normalized records.
///
/// Sheets keep workbook order so the persisted file diffs cleanly between
/// conversion runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sheets: IndexMap<String, Vec<Record>>,
}

impl Document {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert the records for a sheet, replacing any previous entry in place
    pub fn insert_sheet(&mut self, name: &str, records: Vec<Record>) {
        self.sheets.insert(name.to_string(), records);
    }

    #[must_use]
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Get all sheet names in order
    #[must_use]
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Records of a sheet, if the sheet exists
    #[must_use]
    pub fn records(&self, sheet: &str) -> Option<&[Record]> {
        self.sheets.get(sheet).map(Vec::as_slice)
    }

    /// Records of a sheet that downstream consumers depend on.
    ///
    /// A missing or empty collection usually means the upstream schema
    /// changed, so it is reported as `EmptySource` rather than returned as an
    /// empty slice.
    pub fn require_records(&self, sheet: &str) -> Result<&[Record]> {
        match self.records(sheet) {
            Some(records) if !records.is_empty() => Ok(records),
            _ => Err(SheetError::EmptySource {
                sheet: sheet.to_string(),
                available: self.sheets.keys().cloned().collect(),
            }),
        }
    }

    /// Iterate over `(sheet name, records)` in order
    pub fn sheets(&self) -> impl Iterator<Item = (&str, &[Record])> {
        self.sheets
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Record count per sheet, in order
    #[must_use]
    pub fn summary(&self) -> Vec<(&str, usize)> {
        self.sheets()
            .map(|(name, records)| (name, records.len()))
            .collect()
    }

    #[must_use]
    pub fn total_records(&self) -> usize {
        self.sheets.values().map(Vec::len).sum()
    }
}
