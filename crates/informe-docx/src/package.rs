//! Loading and saving the `.docx` package.

use std::fs;
use std::io::{Cursor, Read, Write};
use std::path::Path;

use tracing::{debug, info};
use zip::result::ZipError;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::{DocxError, Result};
use crate::xml::{Element, W_BODY, XmlTree};

/// Archive entry holding the main document body.
pub const DOCUMENT_PART: &str = "word/document.xml";

const W_DOCUMENT: &[u8] = b"w:document";

/// A loaded `.docx` template.
///
/// Only [`DOCUMENT_PART`] is parsed. Headers, footers, styles and media stay
/// as raw archive entries and are copied unchanged on save.
#[derive(Debug, Clone)]
pub struct TemplateDocument {
    archive: Vec<u8>,
    tree: XmlTree,
}

impl TemplateDocument {
    /// Parses a template from the bytes of a `.docx` file.
    pub fn load(bytes: Vec<u8>) -> Result<Self> {
        let (raw, entries) = {
            let mut archive = ZipArchive::new(Cursor::new(bytes.as_slice()))?;
            let mut raw = Vec::new();
            let mut part = archive.by_name(DOCUMENT_PART).map_err(|err| match err {
                ZipError::FileNotFound => DocxError::MissingPart {
                    part: DOCUMENT_PART.to_string(),
                },
                other => DocxError::Archive { source: other },
            })?;
            part.read_to_end(&mut raw)
                .map_err(|source| DocxError::Archive {
                    source: ZipError::Io(source),
                })?;
            drop(part);
            (raw, archive.len())
        };

        let xml = String::from_utf8(raw).map_err(|source| DocxError::Encoding {
            part: DOCUMENT_PART.to_string(),
            source,
        })?;
        let tree = XmlTree::parse(&xml).map_err(|source| DocxError::Xml {
            part: DOCUMENT_PART.to_string(),
            source,
        })?;
        let has_body = tree
            .root()
            .filter(|root| root.is(W_DOCUMENT))
            .and_then(|root| root.first_child(W_BODY))
            .is_some();
        if !has_body {
            return Err(DocxError::Structure {
                part: DOCUMENT_PART.to_string(),
                reason: "expected w:document with a w:body element".to_string(),
            });
        }

        debug!(entries, xml_bytes = xml.len(), "template package loaded");
        Ok(Self {
            archive: bytes,
            tree,
        })
    }

    /// Reads and parses a template file.
    pub fn open(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|source| DocxError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document = Self::load(bytes)?;
        info!(path = %path.display(), "template opened");
        Ok(document)
    }

    /// Serializes the document back into `.docx` bytes.
    ///
    /// Entries keep their original order. Every entry except
    /// [`DOCUMENT_PART`] is copied without recompression.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let xml = self
            .tree
            .to_bytes()
            .map_err(|source| DocxError::Write { source })?;
        let mut archive = ZipArchive::new(Cursor::new(self.archive.as_slice()))?;
        let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(self.archive.len())));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index)?;
            if entry.name() == DOCUMENT_PART {
                drop(entry);
                writer.start_file(DOCUMENT_PART, options)?;
                writer
                    .write_all(&xml)
                    .map_err(|source| DocxError::Write { source })?;
            } else {
                writer.raw_copy_file(entry)?;
            }
        }

        let bytes = writer.finish()?.into_inner();
        debug!(bytes = bytes.len(), "document serialized");
        Ok(bytes)
    }

    /// Writes the serialized document to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let bytes = self.to_bytes()?;
        fs::write(path, bytes).map_err(|source| DocxError::Write { source })
    }

    pub(crate) fn body(&self) -> Option<&Element> {
        self.tree.root().and_then(|root| root.first_child(W_BODY))
    }

    pub(crate) fn body_mut(&mut self) -> Option<&mut Element> {
        self.tree.root_mut().and_then(|root| root.first_child_mut(W_BODY))
    }
}
