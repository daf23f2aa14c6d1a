//! Loading report data tables from CSV, JSON and Excel files.

pub mod error;
pub mod json;
pub mod table;

mod delimited;
mod xlsx;

pub use error::{IngestError, Result};
pub use table::{
    DEFAULT_NULL_MARKERS, DataTable, GridCell, IngestOptions, RecordLayout, TableFormat, read_table,
};
