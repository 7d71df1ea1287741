use crate::cell::CellValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One normalized row: field name -> present cell value, in header order.
///
/// Absent cells are never stored, so `get` returning `Some` always means the
/// source row carried a value for that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, CellValue>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field. Null values are ignored; an existing field keeps its
    /// position and takes the new value.
    pub fn insert<K: Into<String>, V: Into<CellValue>>(&mut self, field: K, value: V) {
        let value = value.into();
        if !value.is_null() {
            self.0.insert(field.into(), value);
        }
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&CellValue> {
        self.0.get(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Field names in header order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn values(&self) -> impl Iterator<Item = &CellValue> {
        self.0.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (field, value) in iter {
            record.insert(field, value);
        }
        record
    }
}

impl IntoIterator for Record {
    type Item = (String, CellValue);
    type IntoIter = indexmap::map::IntoIter<String, CellValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_skips_null() {
        let mut record = Record::new();
        record.insert("id", "m1");
        record.insert("score", CellValue::Null);

        assert_eq!(record.len(), 1);
        assert!(!record.contains("score"));
    }

    #[test]
    fn test_duplicate_field_keeps_first_position() {
        let record: Record = vec![("a", 1), ("b", 2), ("a", 3)].into_iter().collect();

        assert_eq!(record.fields().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(record.get("a"), Some(&CellValue::Int(3)));
    }

    #[test]
    fn test_serializes_in_field_order() {
        let record: Record = vec![("z", "last"), ("a", "first")].into_iter().collect();
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"z":"last","a":"first"}"#);
    }
}
