use matchbook_sheet::CellValue;

/// Read a rating cell as a number.
///
/// Numbers pass through. Text is accepted when it is numeric once `,`
/// thousands separators are removed: the sheet exporter writes every value as
/// text, so ratings often arrive as `"1,500"`.
#[must_use]
pub fn coerce_rating(value: &CellValue) -> Option<CellValue> {
    match value {
        CellValue::Int(_) | CellValue::Float(_) => Some(value.clone()),
        CellValue::String(s) => {
            let cleaned: String = s.trim().chars().filter(|c| *c != ',').collect();
            if let Ok(i) = cleaned.parse::<i64>() {
                Some(CellValue::Int(i))
            } else {
                cleaned
                    .parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .map(CellValue::Float)
            }
        }
        CellValue::Bool(_) | CellValue::Null => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through() {
        assert_eq!(coerce_rating(&CellValue::Int(1500)), Some(CellValue::Int(1500)));
        assert_eq!(
            coerce_rating(&CellValue::Float(1480.5)),
            Some(CellValue::Float(1480.5))
        );
    }

    #[test]
    fn test_text_with_separators() {
        assert_eq!(coerce_rating(&"1,500".into()), Some(CellValue::Int(1500)));
        assert_eq!(coerce_rating(&" 1,480.75 ".into()), Some(CellValue::Float(1480.75)));
        assert_eq!(coerce_rating(&"-12".into()), Some(CellValue::Int(-12)));
    }

    #[test]
    fn test_non_numeric() {
        assert_eq!(coerce_rating(&"n/a".into()), None);
        assert_eq!(coerce_rating(&"".into()), None);
        assert_eq!(coerce_rating(&"inf".into()), None);
        assert_eq!(coerce_rating(&CellValue::Bool(true)), None);
    }
}
