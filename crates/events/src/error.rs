use crate::id::EventId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    /// `row` is the 0-based position of the record in its sheet's record list
    #[error("Record index {row} of match {event} is missing mandatory field '{field}'")]
    MissingMandatoryField {
        event: EventId,
        field: String,
        row: usize,
    },

    #[error("No matches found in '{sheet}' (available sheets: {})", available.join(", "))]
    EmptySource {
        sheet: String,
        available: Vec<String>,
    },

    #[error("Sheet error: {0}")]
    Sheet(#[from] matchbook_sheet::SheetError),
}

pub type Result<T> = std::result::Result<T, EventError>;
