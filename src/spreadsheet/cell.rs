use chrono::NaiveDate;
use serde::Serialize;
use serde::Serializer;
use serde_json::Value;
use std::fmt::Display;

/// A raw cell value as delivered by (or sent to) the grid store.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    /// Absent or null cell
    #[default]
    Empty,
    /// Boolean values (true/false)
    Bool(bool),
    /// Numeric values
    Number(f64),
    /// Text values, unmodified
    Text(String),
    /// Structured calendar date (typed sources only)
    Date(NaiveDate),
}

impl CellValue {
    /// Creates a text cell.
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Returns true for absent cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(value) => value.trim().is_empty(),
            _ => false,
        }
    }

    /// Returns the text content, only for text cells.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Lenient numeric coercion: numbers as-is, trimmed text parsed as a float,
    /// booleans as 1/0. Blank, dates, unparsable text and non-finite values yield None.
    pub fn to_number(&self) -> Option<f64> {
        let number = match self {
            Self::Number(value) => *value,
            Self::Bool(value) => if *value { 1.0 } else { 0.0 },
            Self::Text(value) => {
                let value = value.trim();
                if value.is_empty() {
                    return None;
                }
                value.parse::<f64>().ok()?
            }
            Self::Empty | Self::Date(_) => return None,
        };
        Some(number).filter(|number| number.is_finite())
    }

    /// Converts the cell to the JSON value sent to the grid store.
    /// Empty cells are written as empty strings.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Empty => Value::String(String::new()),
            Self::Bool(value) => Value::Bool(*value),
            Self::Number(value) => serde_json::Number::from_f64(*value)
                .map(Value::Number)
                .unwrap_or_else(|| Value::String(String::new())),
            Self::Text(value) => Value::String(value.to_owned()),
            Self::Date(_) => Value::String(self.to_string()),
        }
    }
}

impl From<Value> for CellValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Empty,
            Value::Bool(value) => Self::Bool(value),
            Value::Number(value) => value.as_f64().map(Self::Number).unwrap_or(Self::Empty),
            Value::String(value) => Self::Text(value),
            other => Self::Text(other.to_string()), // nested values keep their JSON form
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Bool(value) => write!(f, "{}", value),
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(value) => write!(f, "{}", value),
            Self::Date(value) => write!(f, "{}", value.format("%Y-%m-%d")),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_json().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_cells() {
        assert!(CellValue::Empty.is_blank());
        assert!(CellValue::text("").is_blank());
        assert!(CellValue::text("   ").is_blank());
        assert!(!CellValue::text("x").is_blank());
        assert!(!CellValue::Number(0.0).is_blank());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(CellValue::Number(12.0).to_number(), Some(12.0));
        assert_eq!(CellValue::text(" 42 ").to_number(), Some(42.0));
        assert_eq!(CellValue::text("2.5").to_number(), Some(2.5));
        assert_eq!(CellValue::Bool(true).to_number(), Some(1.0));
        assert_eq!(CellValue::text("n/a").to_number(), None);
        assert_eq!(CellValue::text("inf").to_number(), None);
        assert_eq!(CellValue::text("").to_number(), None);
        assert_eq!(CellValue::Empty.to_number(), None);
    }

    #[test]
    fn display() {
        assert_eq!(CellValue::Number(3.0).to_string(), "3");
        assert_eq!(CellValue::Number(3.5).to_string(), "3.5");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(CellValue::Empty.to_string(), "");
        let date = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();
        assert_eq!(CellValue::Date(date).to_string(), "2025-10-10");
    }

    #[test]
    fn json_conversion() {
        assert_eq!(CellValue::from(json!(null)), CellValue::Empty);
        assert_eq!(CellValue::from(json!("Evento")), CellValue::text("Evento"));
        assert_eq!(CellValue::from(json!(7)), CellValue::Number(7.0));
        assert_eq!(CellValue::from(json!(true)), CellValue::Bool(true));
        assert_eq!(CellValue::from(json!([1, 2])), CellValue::text("[1,2]"));

        assert_eq!(CellValue::Empty.to_json(), json!(""));
        assert_eq!(CellValue::Number(3.0).to_json(), json!(3.0));
        let date = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert_eq!(serde_json::to_value(CellValue::Date(date)).unwrap(), json!("2025-01-02"));
    }
}
