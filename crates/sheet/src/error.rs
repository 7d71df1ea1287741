use thiserror::Error;

/// Errors that can occur while loading, normalizing or persisting sheets
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Source unavailable: {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("Row index out of bounds: {index} (sheet has {count} rows)")]
    RowIndexOutOfBounds { index: usize, count: usize },

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Sheet '{sheet}' is missing or empty (available: {})", available.join(", "))]
    EmptySource {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl SheetError {
    pub(crate) fn source_unavailable(path: &std::path::Path, reason: impl ToString) -> Self {
        SheetError::SourceUnavailable {
            path: path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SheetError>;
