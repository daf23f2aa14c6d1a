//! Report generation: placeholder resolution, document filling, rendering and
//! output.
//!
//! # Example
//!
//! ```ignore
//! use informe_core::{DisabledRenderer, generate_report, resolve, write_report};
//!
//! let map = resolve(&record, &metadata, &registry);
//! let report = generate_report(&template_bytes, &map, &DisabledRenderer)?;
//! write_report(&output_dir, index, &report)?;
//! ```

pub mod error;
pub mod filler;
pub mod output;
pub mod render;
pub mod resolver;
pub mod session;

pub use error::{RenderError, ReportError, Result};
pub use filler::{FillStats, GeneratedReport, Rendering, fill_document, generate_report};
pub use output::{OutputKind, REPORT_FILE_PREFIX, WrittenReport, report_file_name, write_report};
pub use render::{
    CommandRenderer, ConverterCommand, DisabledRenderer, DocumentRenderer, INPUT_PLACEHOLDER,
    OUTDIR_PLACEHOLDER,
};
pub use resolver::{resolve, split_incident};
pub use session::{ReportForm, ReportSession};
