//! JSON record arrays.
//!
//! A JSON data file is an array of objects, one object per record. A column
//! is added the first time its key is seen; keys within one object are taken
//! in sorted order.

use std::path::Path;

use serde_json::Value;

use informe_model::CellValue;

use crate::error::{IngestError, Result};

/// Converts a JSON scalar into a cell value.
///
/// Nested arrays and objects are kept as compact JSON text.
pub fn json_to_cell(value: &Value) -> CellValue {
    match value {
        Value::Null => CellValue::Missing,
        Value::Bool(flag) => CellValue::Boolean(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(int) => CellValue::Integer(int),
            None => number
                .as_f64()
                .map_or_else(|| CellValue::Text(number.to_string()), CellValue::Float),
        },
        Value::String(text) => CellValue::Text(text.clone()),
        Value::Array(_) | Value::Object(_) => CellValue::Text(value.to_string()),
    }
}

pub(crate) struct JsonRows {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

pub(crate) fn parse_json_rows(path: &Path, content: &str) -> Result<JsonRows> {
    let document: Value =
        serde_json::from_str(content).map_err(|source| IngestError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;
    let Value::Array(items) = document else {
        return Err(IngestError::JsonShape {
            path: path.to_path_buf(),
            reason: "top-level value must be an array".to_string(),
        });
    };

    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let Value::Object(object) = item else {
            return Err(IngestError::JsonShape {
                path: path.to_path_buf(),
                reason: format!("item {idx} is not an object"),
            });
        };
        for key in object.keys() {
            if !headers.iter().any(|existing| existing == key) {
                headers.push(key.clone());
            }
        }
        objects.push(object);
    }

    let rows = objects
        .iter()
        .map(|object| {
            headers
                .iter()
                .map(|header| object.get(header).map_or(CellValue::Missing, json_to_cell))
                .collect()
        })
        .collect();
    Ok(JsonRows { headers, rows })
}
