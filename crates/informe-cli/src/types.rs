use std::fmt;
use std::path::PathBuf;

use informe_core::{FillStats, WrittenReport};
use informe_docx::{ConsentState, NextVisitKind};
use informe_model::PlaceholderToken;

/// Result of the `fill` command.
#[derive(Debug, Clone)]
pub struct FillOutcome {
    pub template: PathBuf,
    pub record_index: usize,
    pub record_count: usize,
    pub written: WrittenReport,
    pub stats: FillStats,
    /// Why the fixed-layout copy is missing, if it is.
    pub rendering_error: Option<String>,
    /// Template tokens with no replacement; they remain verbatim in the output.
    pub unresolved: Vec<PlaceholderToken>,
}

/// How a template token is satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    /// A column of the selected record.
    Record,
    /// A reserved report field.
    Metadata,
    /// No column or reserved field provides it.
    Unresolved,
    /// No data file was given, so record columns could not be checked.
    Unchecked,
}

impl TokenSource {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Record => "record",
            Self::Metadata => "metadata",
            Self::Unresolved => "unresolved",
            Self::Unchecked => "unchecked",
        }
    }
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStatus {
    pub token: PlaceholderToken,
    pub source: TokenSource,
}

/// Result of the `tokens` command.
#[derive(Debug, Clone)]
pub struct TokenReport {
    pub template: PathBuf,
    pub tokens: Vec<TokenStatus>,
}

impl TokenReport {
    pub fn unresolved_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|status| status.source == TokenSource::Unresolved)
            .count()
    }
}

/// Result of the `inspect` command.
#[derive(Debug, Clone)]
pub struct InspectReport {
    pub document: PathBuf,
    pub checkboxes: usize,
    pub consent: ConsentState,
    pub next_visits: Vec<Option<NextVisitKind>>,
}
