//! JSON persistence for [`Document`]
//!
//! The file is a single object: `{"Sheet": [{"field": value, ...}, ...], ...}`.
//! Output is pretty-printed with two-space indentation, UTF-8 with non-ASCII
//! characters kept as-is, and fields in header order.

use crate::cell::CellValue;
use crate::document::Document;
use crate::error::{Result, SheetError};
use crate::record::Record;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

impl Document {
    /// Load a document from a JSON file
    ///
    /// # Example
    /// ```no_run
    /// use matchbook_sheet::Document;
    ///
    /// let doc = Document::from_json("client/public/data.json").unwrap();
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SheetError::source_unavailable(path, e))?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Load a document from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        Self::from_json_reader(content.as_bytes())
    }

    /// Load a document from a reader.
    ///
    /// Null field values are dropped so loaded records hold the same
    /// "present fields only" shape as freshly normalized ones.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let value: Value = serde_json::from_reader(reader)
            .map_err(|e| SheetError::Parse(format!("Invalid JSON: {e}")))?;

        let Value::Object(sheets) = value else {
            return Err(SheetError::Parse(
                "Document must be an object of sheet name -> records".to_string(),
            ));
        };

        let mut doc = Document::new();
        for (name, records) in sheets {
            let Value::Array(items) = records else {
                return Err(SheetError::Parse(format!(
                    "Sheet '{name}' must be an array of objects"
                )));
            };

            let mut parsed = Vec::with_capacity(items.len());
            for (idx, item) in items.into_iter().enumerate() {
                let Value::Object(fields) = item else {
                    return Err(SheetError::Parse(format!(
                        "Element {idx} of sheet '{name}' must be an object"
                    )));
                };
                parsed.push(
                    fields
                        .into_iter()
                        .map(|(field, value)| (field, json_value_to_cell(value)))
                        .collect::<Record>(),
                );
            }
            doc.insert_sheet(&name, parsed);
        }

        Ok(doc)
    }

    /// Save the document as pretty JSON, creating parent directories
    pub fn save_as_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_json(&mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Write the document to a writer as pretty JSON
    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| SheetError::Serialize(format!("JSON write error: {e}")))
    }

    /// Convert to a pretty JSON string
    pub fn to_json_string_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SheetError::Serialize(format!("JSON write error: {e}")))
    }
}

/// Convert a serde_json Value to a CellValue
fn json_value_to_cell(value: Value) -> CellValue {
    match value {
        Value::Null => CellValue::Null,
        Value::Bool(b) => CellValue::Bool(b),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Int(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        Value::String(s) => CellValue::String(s),
        // Nested structures are not cell values; keep their JSON text
        Value::Array(_) | Value::Object(_) => CellValue::String(value.to_string()),
    }
}
