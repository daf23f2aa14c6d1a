use std::path::Path;

use csv::ReaderBuilder;

use crate::error::{IngestError, Result};

const BOM: char = '\u{feff}';

/// Header text with the BOM stripped and inner whitespace runs collapsed.
pub(crate) fn normalize_header(raw: &str) -> String {
    raw.trim_matches(|c: char| c == BOM || c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Reads every non-blank row of a CSV file. Cell text is kept exactly as written.
pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let parse_error = |source: csv::Error| IngestError::CsvParse {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(parse_error)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        let row: Vec<String> = record
            .map_err(parse_error)?
            .iter()
            .map(str::to_string)
            .collect();
        if row.iter().any(|value| !value.trim().is_empty()) {
            rows.push(row);
        }
    }
    Ok(rows)
}
