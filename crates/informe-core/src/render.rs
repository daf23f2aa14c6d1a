//! Fixed-layout rendering of filled documents.
//!
//! The conversion itself is delegated to an external program. The default
//! converter is LibreOffice in headless mode.

use std::fs;
use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::RenderError;

/// Argument placeholder replaced by the converter's output directory.
pub const OUTDIR_PLACEHOLDER: &str = "{outdir}";
/// Argument placeholder replaced by the path of the document to convert.
pub const INPUT_PLACEHOLDER: &str = "{input}";

const INPUT_FILE_NAME: &str = "document.docx";
const OUTPUT_FILE_NAME: &str = "document.pdf";

/// Produces a print-ready rendering of a serialized `.docx` document.
pub trait DocumentRenderer {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Renders the document bytes.
    fn render(&self, docx: &[u8]) -> Result<Vec<u8>, RenderError>;
}

/// External converter invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConverterCommand {
    pub program: String,
    /// Arguments; [`OUTDIR_PLACEHOLDER`] and [`INPUT_PLACEHOLDER`] are
    /// substituted before running.
    #[serde(default)]
    pub args: Vec<String>,
}

impl Default for ConverterCommand {
    fn default() -> Self {
        Self {
            program: "soffice".to_string(),
            args: [
                "--headless",
                "--convert-to",
                "pdf",
                "--outdir",
                OUTDIR_PLACEHOLDER,
                INPUT_PLACEHOLDER,
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}

impl ConverterCommand {
    fn expanded_args(&self, outdir: &Path, input: &Path) -> Vec<String> {
        let outdir = outdir.to_string_lossy();
        let input = input.to_string_lossy();
        self.args
            .iter()
            .map(|arg| {
                arg.replace(OUTDIR_PLACEHOLDER, &outdir)
                    .replace(INPUT_PLACEHOLDER, &input)
            })
            .collect()
    }
}

/// Renders by running a converter program in a temporary directory.
///
/// The document is written as `document.docx`; the converter must leave
/// `document.pdf` in the same directory.
#[derive(Debug, Clone, Default)]
pub struct CommandRenderer {
    command: ConverterCommand,
}

impl CommandRenderer {
    pub fn new(command: ConverterCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &ConverterCommand {
        &self.command
    }
}

impl DocumentRenderer for CommandRenderer {
    fn name(&self) -> &str {
        &self.command.program
    }

    fn render(&self, docx: &[u8]) -> Result<Vec<u8>, RenderError> {
        let program = self.command.program.clone();
        let workdir = tempfile::tempdir().map_err(|source| RenderError::Workspace { source })?;
        let input = workdir.path().join(INPUT_FILE_NAME);
        fs::write(&input, docx).map_err(|source| RenderError::Workspace { source })?;

        let args = self.command.expanded_args(workdir.path(), &input);
        debug!(program = %program, ?args, "running converter");
        let output = Command::new(&program)
            .args(&args)
            .current_dir(workdir.path())
            .output()
            .map_err(|source| RenderError::Spawn {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RenderError::Failed {
                program,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let rendered = workdir.path().join(OUTPUT_FILE_NAME);
        if !rendered.is_file() {
            return Err(RenderError::MissingOutput {
                program,
                path: rendered,
            });
        }
        let bytes = fs::read(&rendered).map_err(|source| RenderError::Workspace { source })?;
        if bytes.is_empty() {
            return Err(RenderError::EmptyOutput { program });
        }
        info!(program = %program, bytes = bytes.len(), "document rendered");
        Ok(bytes)
    }
}

/// Renderer used when rendering is turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledRenderer;

impl DocumentRenderer for DisabledRenderer {
    fn name(&self) -> &str {
        "disabled"
    }

    fn render(&self, _docx: &[u8]) -> Result<Vec<u8>, RenderError> {
        Err(RenderError::Disabled)
    }
}
