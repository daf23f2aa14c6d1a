//! Error types for template loading and saving.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing a `.docx` package.
#[derive(Debug, Error)]
pub enum DocxError {
    /// Failed to read the template file.
    #[error("failed to read template {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Bytes are not a readable ZIP archive, or the archive could not be written.
    #[error("invalid .docx archive: {source}")]
    Archive {
        #[source]
        source: zip::result::ZipError,
    },

    /// A required package part is absent.
    #[error("missing package part: {part}")]
    MissingPart { part: String },

    /// A package part is not valid UTF-8.
    #[error("package part {part} is not UTF-8: {source}")]
    Encoding {
        part: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A package part is not well-formed XML.
    #[error("malformed XML in {part}: {source}")]
    Xml {
        part: String,
        #[source]
        source: quick_xml::Error,
    },

    /// The XML is well-formed but not a WordprocessingML document.
    #[error("unexpected document structure in {part}: {reason}")]
    Structure { part: String, reason: String },

    /// Writing the serialized package failed.
    #[error("failed to write document: {source}")]
    Write {
        #[source]
        source: std::io::Error,
    },
}

impl From<zip::result::ZipError> for DocxError {
    fn from(source: zip::result::ZipError) -> Self {
        Self::Archive { source }
    }
}

/// Result type for template operations.
pub type Result<T> = std::result::Result<T, DocxError>;
