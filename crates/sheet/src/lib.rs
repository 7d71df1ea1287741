//! Sheet/Book module for matchbook
//!
//! Loads spreadsheet exports (xlsx, xls, ods, csv) into sheets of untyped
//! cells, normalizes each sheet into field-keyed records, and persists the
//! result as a JSON interchange document.
//!
//! # Examples
//!
//! ## Normalizing a sheet
//!
//! ```
//! use matchbook_sheet::{CellValue, NormalizeOptions, Sheet};
//!
//! let sheet = Sheet::from_data(vec![
//!     vec![CellValue::from("id"), CellValue::from("player_name"), CellValue::from("player_elo_after")],
//!     vec![CellValue::from("m1"), CellValue::from("Alice"), CellValue::Int(1500)],
//!     vec![CellValue::Null, CellValue::Null, CellValue::Null],
//! ]);
//!
//! let records = sheet.normalize(&NormalizeOptions::default());
//! assert_eq!(records.len(), 1);
//! assert_eq!(records[0].get("player_elo_after"), Some(&CellValue::Int(1500)));
//! ```
//!
//! ## Converting a workbook
//!
//! ```no_run
//! use matchbook_sheet::{Book, NormalizeOptions};
//!
//! let book = Book::from_workbook("S4LeagueAutomatisierung.xlsx").unwrap();
//! let doc = book.to_document(&NormalizeOptions::default());
//! doc.save_as_json("client/public/data.json").unwrap();
//! ```

mod book;
mod cell;
mod csv;
mod document;
mod error;
mod json;
mod record;
mod sheet;
mod workbook;

/// Re-export book type.
pub use book::Book;
/// Re-export cell value type.
pub use cell::CellValue;
/// Re-export CSV options.
pub use csv::CsvOptions;
/// Re-export the interchange document.
pub use document::Document;
/// Re-export sheet error types.
pub use error::{Result, SheetError};
/// Re-export record type.
pub use record::Record;
/// Re-export sheet type and normalization options.
pub use sheet::{ContentRule, NormalizeOptions, Sheet};
