use std::fmt;

use serde::{Deserialize, Serialize};

/// A scalar cell value from a tabular source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Null, empty or otherwise absent value.
    #[default]
    Missing,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    /// Builds a text value, mapping `None` to [`CellValue::Missing`].
    pub fn text(value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => Self::Text(value.into()),
            None => Self::Missing,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// String form used for substitution; missing values render as empty.
    ///
    /// Whole floats keep a trailing `.0` and booleans are capitalized, as a
    /// spreadsheet export writes them.
    pub fn render(&self) -> String {
        if self.is_missing() {
            String::new()
        } else {
            self.to_string()
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => Ok(()),
            Self::Boolean(true) => f.write_str("True"),
            Self::Boolean(false) => f.write_str("False"),
            Self::Integer(value) => write!(f, "{value}"),
            // Debug keeps the fractional part of whole floats (`63.0`).
            Self::Float(value) => write!(f, "{value:?}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for CellValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}
