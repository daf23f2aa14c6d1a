//! Document filling and report generation.

use std::time::Instant;

use informe_docx::{Paragraph, Table, TemplateDocument};
use informe_model::{PlaceholderToken, ReplacementMap};
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::render::DocumentRenderer;

/// Counters collected while filling a document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillStats {
    /// Top-level paragraphs whose text changed.
    pub paragraphs_rewritten: usize,
    /// Table cells with at least one changed paragraph.
    pub cells_rewritten: usize,
    /// Occurrences replaced per token, in order of first replacement.
    pub occurrences: Vec<(PlaceholderToken, usize)>,
}

impl FillStats {
    /// Total number of token occurrences replaced.
    pub fn total_replacements(&self) -> usize {
        self.occurrences.iter().map(|(_, count)| count).sum()
    }

    /// Occurrences replaced for one token, by its literal text.
    pub fn count_for(&self, token: &str) -> usize {
        self.occurrences
            .iter()
            .find(|(existing, _)| existing.as_str() == token)
            .map_or(0, |(_, count)| *count)
    }

    fn add(&mut self, counts: Vec<(PlaceholderToken, usize)>) {
        for (token, count) in counts {
            match self.occurrences.iter_mut().find(|(existing, _)| *existing == token) {
                Some((_, total)) => *total += count,
                None => self.occurrences.push((token, count)),
            }
        }
    }
}

/// The outputs of one report generation.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    /// The filled `.docx` package.
    pub docx: Vec<u8>,
    pub rendering: Rendering,
    pub stats: FillStats,
    /// Template tokens the map has no entry for, in order of first appearance.
    /// They are left in the document as written.
    pub unresolved: Vec<PlaceholderToken>,
}

/// Outcome of the fixed-layout rendering step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering {
    Available(Vec<u8>),
    Unavailable { reason: String },
}

impl Rendering {
    pub fn bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Available(bytes) => Some(bytes),
            Self::Unavailable { .. } => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }
}

/// Substitutes the map into every paragraph and table cell of `document`.
pub fn fill_document(document: &mut TemplateDocument, map: &ReplacementMap) -> FillStats {
    let mut stats = FillStats::default();
    let mut body = document.body_blocks_mut();

    for paragraph in &mut body.paragraphs {
        if fill_paragraph(paragraph, map, &mut stats) {
            stats.paragraphs_rewritten += 1;
        }
    }
    for table in &mut body.tables {
        fill_table(table, map, &mut stats);
    }

    debug!(
        paragraphs = stats.paragraphs_rewritten,
        cells = stats.cells_rewritten,
        replacements = stats.total_replacements(),
        "document filled"
    );
    stats
}

fn fill_table(table: &mut Table<'_>, map: &ReplacementMap, stats: &mut FillStats) {
    for row in &mut table.rows {
        for cell in &mut row.cells {
            let mut changed = false;
            for paragraph in &mut cell.paragraphs {
                changed |= fill_paragraph(paragraph, map, stats);
            }
            if changed {
                stats.cells_rewritten += 1;
            }
            for nested in &mut cell.tables {
                fill_table(nested, map, stats);
            }
        }
    }
}

fn fill_paragraph(paragraph: &mut Paragraph<'_>, map: &ReplacementMap, stats: &mut FillStats) -> bool {
    let counts = map.occurrences(&paragraph.text());
    if counts.is_empty() {
        return false;
    }
    stats.add(counts);
    paragraph.rewrite_with(|text| map.apply(text).0)
}

/// Fills a template and requests a rendering of the result.
///
/// Template errors abort. A rendering failure is logged and reported as
/// [`Rendering::Unavailable`]; the filled document is returned either way.
pub fn generate_report(
    template: &[u8],
    map: &ReplacementMap,
    renderer: &dyn DocumentRenderer,
) -> Result<GeneratedReport> {
    let started = Instant::now();
    let mut document = TemplateDocument::load(template.to_vec())?;
    let unresolved: Vec<PlaceholderToken> = document
        .placeholders()
        .into_iter()
        .filter(|token| !map.contains(token.as_str()))
        .collect();
    if !unresolved.is_empty() {
        debug!(count = unresolved.len(), "template has unresolved tokens");
    }
    let stats = fill_document(&mut document, map);
    let docx = document.to_bytes()?;

    let rendering = match renderer.render(&docx) {
        Ok(bytes) if bytes.is_empty() => {
            warn!(renderer = renderer.name(), "renderer returned no data");
            Rendering::Unavailable {
                reason: format!("{} returned no data", renderer.name()),
            }
        }
        Ok(bytes) => Rendering::Available(bytes),
        Err(err) => {
            warn!(renderer = renderer.name(), error = %err, "rendering unavailable");
            Rendering::Unavailable {
                reason: err.to_string(),
            }
        }
    };

    info!(
        replacements = stats.total_replacements(),
        docx_bytes = docx.len(),
        rendered = rendering.is_available(),
        duration_ms = started.elapsed().as_millis(),
        "report generated"
    );
    Ok(GeneratedReport {
        docx,
        rendering,
        stats,
        unresolved,
    })
}
