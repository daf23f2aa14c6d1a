//! Data tables and record selection.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use informe_model::{CellValue, TabularRecord};

use crate::delimited::{normalize_header, read_rows};
use crate::error::{IngestError, Result};
use crate::json::parse_json_rows;
use crate::xlsx::read_first_sheet;

/// Cell texts treated as missing values in addition to the empty string.
pub const DEFAULT_NULL_MARKERS: [&str; 4] = ["NaN", "nan", "NULL", "null"];

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Csv,
    Json,
    /// Excel workbook; the first worksheet is read.
    Xlsx,
}

impl TableFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }
}

/// How records are laid out in a CSV or spreadsheet grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordLayout {
    /// First row holds column names; every further row is one record.
    #[default]
    Rows,
    /// Transposed sheet: first row holds record labels, first column holds
    /// field names, every further column is one record.
    Columns,
}

impl RecordLayout {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rows => "rows",
            Self::Columns => "columns",
        }
    }
}

impl fmt::Display for RecordLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Options controlling table ingestion.
#[derive(Debug, Clone)]
pub struct IngestOptions {
    pub layout: RecordLayout,
    /// Cell texts read as missing values. Empty cells are always missing.
    pub null_markers: Vec<String>,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            layout: RecordLayout::default(),
            null_markers: DEFAULT_NULL_MARKERS.iter().map(ToString::to_string).collect(),
        }
    }
}

impl IngestOptions {
    #[must_use]
    pub fn with_layout(mut self, layout: RecordLayout) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_null_markers(mut self, markers: Vec<String>) -> Self {
        self.null_markers = markers;
        self
    }

    /// Blank text and null markers are missing; anything else is kept verbatim.
    pub(crate) fn cell(&self, raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.null_markers.iter().any(|marker| marker == trimmed) {
            CellValue::Missing
        } else {
            CellValue::Text(raw.to_string())
        }
    }
}

/// One cell of a raw grid: a field name in header position, a value elsewhere.
pub trait GridCell {
    fn header_text(&self) -> String;
    fn value(&self, options: &IngestOptions) -> CellValue;
}

impl GridCell for String {
    fn header_text(&self) -> String {
        self.clone()
    }

    fn value(&self, options: &IngestOptions) -> CellValue {
        options.cell(self)
    }
}

fn value_at<C: GridCell>(row: &[C], idx: usize, options: &IngestOptions) -> CellValue {
    row.get(idx)
        .map_or(CellValue::Missing, |cell| cell.value(options))
}

fn header_at<C: GridCell>(row: &[C], idx: usize) -> String {
    row.get(idx)
        .map(|cell| normalize_header(&cell.header_text()))
        .unwrap_or_default()
}

/// A loaded table: field names plus one value vector per record.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataTable {
    pub fields: Vec<String>,
    pub records: Vec<Vec<CellValue>>,
}

impl DataTable {
    /// Builds a table from a raw grid according to `options.layout`.
    pub fn from_grid<C: GridCell>(grid: &[Vec<C>], options: &IngestOptions) -> Self {
        match options.layout {
            RecordLayout::Rows => Self::from_row_grid(grid, options),
            RecordLayout::Columns => Self::from_column_grid(grid, options),
        }
    }

    fn from_row_grid<C: GridCell>(grid: &[Vec<C>], options: &IngestOptions) -> Self {
        let Some((header, body)) = grid.split_first() else {
            return Self::default();
        };
        let fields: Vec<String> = (0..header.len()).map(|idx| header_at(header, idx)).collect();
        let records = body
            .iter()
            .map(|row| {
                (0..fields.len())
                    .map(|idx| value_at(row, idx, options))
                    .collect()
            })
            .collect();
        Self { fields, records }
    }

    fn from_column_grid<C: GridCell>(grid: &[Vec<C>], options: &IngestOptions) -> Self {
        let Some((labels, body)) = grid.split_first() else {
            return Self::default();
        };
        let record_count = labels.len().saturating_sub(1);
        let fields: Vec<String> = body
            .iter()
            .map(|row| header_at(row, 0))
            .collect();
        let records = (1..=record_count)
            .map(|column| {
                body.iter()
                    .map(|row| value_at(row, column, options))
                    .collect()
            })
            .collect();
        Self { fields, records }
    }

    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Selects one record by zero-based index.
    pub fn record(&self, index: usize) -> Result<TabularRecord> {
        let values = self
            .records
            .get(index)
            .ok_or(IngestError::RecordOutOfRange {
                index,
                count: self.records.len(),
            })?;
        Ok(TabularRecord::from_pairs(
            self.fields.iter().cloned().zip(values.iter().cloned()),
        ))
    }
}

/// Reads a data table from a CSV, JSON or `.xlsx` file.
pub fn read_table(path: &Path, options: &IngestOptions) -> Result<DataTable> {
    if !path.is_file() {
        return Err(IngestError::FileNotFound {
            path: path.to_path_buf(),
        });
    }
    let format = TableFormat::from_path(path).ok_or_else(|| IngestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let table = match format {
        TableFormat::Csv => {
            let grid = read_rows(path)?;
            DataTable::from_grid(&grid, options)
        }
        TableFormat::Xlsx => {
            let grid = read_first_sheet(path)?;
            DataTable::from_grid(&grid, options)
        }
        TableFormat::Json => {
            let content = fs::read_to_string(path).map_err(|source| IngestError::FileRead {
                path: path.to_path_buf(),
                source,
            })?;
            if options.layout != RecordLayout::Rows {
                debug!(layout = %options.layout, "record layout ignored for JSON data");
            }
            let parsed = parse_json_rows(path, &content)?;
            DataTable {
                fields: parsed.headers,
                records: parsed.rows,
            }
        }
    };
    info!(
        path = %path.display(),
        fields = table.fields.len(),
        records = table.record_count(),
        layout = %options.layout,
        "data table loaded"
    );
    Ok(table)
}
