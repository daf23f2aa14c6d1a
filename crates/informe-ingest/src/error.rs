//! Error types for report data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a data table.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Data file not found.
    #[error("data file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported table format.
    #[error("unsupported data format for {path} (expected .csv, .json or .xlsx)")]
    UnsupportedFormat { path: PathBuf },

    // === Parsing Errors ===
    /// Failed to parse CSV.
    #[error("failed to parse CSV {path}: {source}")]
    CsvParse {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    /// Failed to parse JSON.
    #[error("failed to parse JSON {path}: {source}")]
    JsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Failed to read an Excel workbook.
    #[error("failed to read workbook {path}: {source}")]
    XlsxRead {
        path: PathBuf,
        #[source]
        source: calamine::XlsxError,
    },

    /// Workbook has no worksheets.
    #[error("workbook {path} has no worksheets")]
    EmptyWorkbook { path: PathBuf },

    /// JSON document is not an array of objects.
    #[error("unexpected JSON shape in {path}: {reason}")]
    JsonShape { path: PathBuf, reason: String },

    // === Selection Errors ===
    /// Requested record does not exist.
    #[error("record {index} out of range (table has {count} records)")]
    RecordOutOfRange { index: usize, count: usize },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
