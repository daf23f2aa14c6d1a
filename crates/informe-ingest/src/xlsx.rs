//! Excel workbooks.
//!
//! Only the first worksheet is read. Numbers, booleans and dates keep the type
//! the workbook stores; text cells go through the same null markers as CSV.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, XlsxError, open_workbook};
use tracing::debug;

use informe_model::CellValue;

use crate::error::{IngestError, Result};
use crate::table::{GridCell, IngestOptions};

impl GridCell for Data {
    fn header_text(&self) -> String {
        self.to_string()
    }

    fn value(&self, options: &IngestOptions) -> CellValue {
        match self {
            Self::Empty | Self::Error(_) => CellValue::Missing,
            Self::Int(value) => CellValue::Integer(*value),
            Self::Float(value) => CellValue::Float(*value),
            Self::Bool(value) => CellValue::Boolean(*value),
            Self::String(text) | Self::DateTimeIso(text) | Self::DurationIso(text) => {
                options.cell(text)
            }
            Self::DateTime(value) => value.as_datetime().map_or_else(
                || CellValue::Float(value.as_f64()),
                |datetime| CellValue::Text(datetime.to_string()),
            ),
        }
    }
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty => true,
        Data::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

/// Reads the first worksheet as a grid, skipping blank rows.
pub(crate) fn read_first_sheet(path: &Path) -> Result<Vec<Vec<Data>>> {
    let workbook_error = |source: XlsxError| IngestError::XlsxRead {
        path: path.to_path_buf(),
        source,
    };
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(workbook_error)?;
    let sheet = workbook.sheet_names().first().cloned().ok_or_else(|| {
        IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        }
    })?;
    let range = workbook.worksheet_range(&sheet).map_err(workbook_error)?;
    debug!(path = %path.display(), sheet = %sheet, "reading worksheet");
    Ok(range
        .rows()
        .filter(|row| !row.iter().all(is_blank))
        .map(<[Data]>::to_vec)
        .collect())
}
