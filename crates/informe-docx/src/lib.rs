//! `.docx` template handling.
//!
//! A [`TemplateDocument`] keeps the original package bytes and a parsed tree of
//! `word/document.xml`. Paragraphs and table cells are exposed as text blocks
//! that can be rewritten in place; saving re-emits only the main document part
//! and copies every other archive entry untouched.

pub mod document;
pub mod error;
pub mod inspect;
pub mod package;

mod xml;

pub use document::{BlockLocation, BlockText, Body, Cell, Paragraph, Row, Table};
pub use error::{DocxError, Result};
pub use inspect::{
    CONSENT_FIELD, ConsentState, FormCheckbox, NEXT_VISIT_MARKER, NextVisitKind, consent_state,
    form_checkboxes, next_visit_kinds,
};
pub use package::{DOCUMENT_PART, TemplateDocument};
