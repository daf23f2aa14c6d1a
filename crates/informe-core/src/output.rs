//! Output file naming and writing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{ReportError, Result};
use crate::filler::GeneratedReport;

/// File name prefix shared by all generated reports.
pub const REPORT_FILE_PREFIX: &str = "informe_col";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    /// The filled `.docx` document.
    Document,
    /// The fixed-layout rendering.
    Rendering,
}

impl OutputKind {
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Document => "docx",
            Self::Rendering => "pdf",
        }
    }
}

/// `informe_col<index>.<ext>`.
pub fn report_file_name(index: usize, kind: OutputKind) -> String {
    format!("{REPORT_FILE_PREFIX}{index}.{}", kind.extension())
}

/// Paths written by [`write_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenReport {
    pub document: PathBuf,
    /// `None` when the rendering was unavailable.
    pub rendering: Option<PathBuf>,
}

/// Writes the available outputs of `report` into `dir`, creating it if needed.
///
/// Without a rendering, any `informe_col<index>.pdf` already in `dir` is
/// removed so it cannot be mistaken for this report.
pub fn write_report(dir: &Path, index: usize, report: &GeneratedReport) -> Result<WrittenReport> {
    fs::create_dir_all(dir).map_err(|source| ReportError::OutputDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let document = dir.join(report_file_name(index, OutputKind::Document));
    write_file(&document, &report.docx)?;

    let rendering_path = dir.join(report_file_name(index, OutputKind::Rendering));
    let rendering = match report.rendering.bytes() {
        Some(bytes) => {
            write_file(&rendering_path, bytes)?;
            Some(rendering_path)
        }
        None => {
            remove_stale(&rendering_path)?;
            None
        }
    };

    info!(
        document = %document.display(),
        rendered = rendering.is_some(),
        "report written"
    );
    Ok(WrittenReport {
        document,
        rendering,
    })
}

fn remove_stale(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "removed stale rendering");
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ReportError::RemoveStale {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
