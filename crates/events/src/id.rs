use matchbook_sheet::CellValue;
use serde::Serialize;
use std::fmt;

/// Opaque match identifier.
///
/// Only equality, hashing and display are meaningful. Numbers compare by
/// value: `7`, `7.0` and `true` (as `1`) fold into `Int`, while a fractional
/// number never equals text that looks like it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum EventId {
    Int(i64),
    /// Fractional number in its shortest round-trip text form
    Float(String),
    Text(String),
}

impl EventId {
    /// Read an identifier from a cell. Falsy cells (null, empty text, zero,
    /// `false`) carry no identifier.
    #[must_use]
    pub fn from_cell(value: &CellValue) -> Option<Self> {
        if !value.is_truthy() {
            return None;
        }
        let id = match value {
            CellValue::Int(i) => EventId::Int(*i),
            CellValue::Float(f) => match CellValue::number(*f) {
                CellValue::Int(i) => EventId::Int(i),
                _ => EventId::Float(f.to_string()),
            },
            CellValue::String(s) => EventId::Text(s.clone()),
            CellValue::Bool(b) => EventId::Int(i64::from(*b)),
            CellValue::Null => return None,
        };
        Some(id)
    }

    /// Display form cut to `max_chars` characters, with `...` when cut
    #[must_use]
    pub fn abbreviated(&self, max_chars: usize) -> String {
        let full = self.to_string();
        if full.chars().count() <= max_chars {
            full
        } else {
            let head: String = full.chars().take(max_chars).collect();
            format!("{head}...")
        }
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventId::Int(i) => write!(f, "{i}"),
            EventId::Float(s) | EventId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<&str> for EventId {
    fn from(s: &str) -> Self {
        EventId::Text(s.to_string())
    }
}

impl From<i64> for EventId {
    fn from(i: i64) -> Self {
        EventId::Int(i)
    }
}
