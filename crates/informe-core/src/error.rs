//! Error types for report generation.

use std::path::PathBuf;

use informe_docx::DocxError;
use thiserror::Error;

/// Errors that abort report generation.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The template could not be loaded or serialized.
    #[error("template error: {0}")]
    Template(#[from] DocxError),

    /// Failed to create the output directory.
    #[error("failed to create output directory {path}: {source}")]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to remove a rendering left by an earlier run.
    #[error("failed to remove stale {path}: {source}")]
    RemoveStale {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write an output file.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from a fixed-layout renderer.
///
/// Rendering failures never abort report generation; they mark the rendering
/// as unavailable.
#[derive(Debug, Error)]
pub enum RenderError {
    /// Rendering was turned off.
    #[error("rendering is disabled")]
    Disabled,

    /// Failed to prepare the converter's working directory.
    #[error("failed to prepare converter workspace: {source}")]
    Workspace {
        #[source]
        source: std::io::Error,
    },

    /// The converter program could not be started.
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The converter exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    /// The converter finished but the expected output file is absent.
    #[error("{program} did not produce {path}")]
    MissingOutput { program: String, path: PathBuf },

    /// The converter produced an empty file.
    #[error("{program} produced an empty rendering")]
    EmptyOutput { program: String },
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
