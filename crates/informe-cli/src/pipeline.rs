//! Command pipelines: ingest, resolve, fill, render, write.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, info_span, trace};

use informe_core::{
    CommandRenderer, DisabledRenderer, DocumentRenderer, Rendering, ReportForm, generate_report,
    resolve, write_report,
};
use informe_docx::{TemplateDocument, consent_state, form_checkboxes, next_visit_kinds};
use informe_ingest::{IngestOptions, RecordLayout, read_table};
use informe_model::{
    MetadataFields, PlaceholderToken, ReplacementMap, ReplacementSection, TabularRecord, reserved,
};

use crate::config::AppConfig;
use crate::logging::redact_value;
use crate::types::{FillOutcome, InspectReport, TokenReport, TokenSource, TokenStatus};

/// Data source and record selection.
#[derive(Debug, Clone)]
pub struct DataSelection {
    pub path: PathBuf,
    pub index: usize,
    pub layout: RecordLayout,
}

#[derive(Debug, Clone)]
pub struct FillRequest {
    pub template: PathBuf,
    pub data: DataSelection,
    pub form: ReportForm,
    pub output_dir: PathBuf,
    /// Request the fixed-layout copy from the configured converter.
    pub render: bool,
}

/// Loads the table and selects one record. Returns the record and the
/// number of records in the table.
pub fn load_record(selection: &DataSelection, config: &AppConfig) -> Result<(TabularRecord, usize)> {
    let options = IngestOptions::default()
        .with_layout(selection.layout)
        .with_null_markers(config.null_markers.clone());
    let table = read_table(&selection.path, &options)
        .with_context(|| format!("load data {}", selection.path.display()))?;
    let record = table
        .record(selection.index)
        .with_context(|| format!("select record in {}", selection.path.display()))?;
    Ok((record, table.record_count()))
}

fn read_template(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("read template {}", path.display()))
}

/// Runs the full report generation for one record.
pub fn run_fill_pipeline(request: &FillRequest, config: &AppConfig) -> Result<FillOutcome> {
    let span = info_span!("fill", record = request.form.record_index);
    let _guard = span.enter();

    let form = &request.form;

    let ingest_start = Instant::now();
    let (record, record_count) = load_record(&request.data, config)?;
    info!(
        fields = record.len(),
        records = record_count,
        duration_ms = ingest_start.elapsed().as_millis(),
        "record selected"
    );
    for (name, value) in record.iter() {
        let rendered = value.render();
        trace!(field = name, value = redact_value(&rendered), "record value");
    }

    let map = resolve(&record, &form.metadata(), &config.doctors);
    let template = read_template(&request.template)?;

    let renderer: Box<dyn DocumentRenderer> = if request.render {
        Box::new(CommandRenderer::new(config.renderer.clone()))
    } else {
        Box::new(DisabledRenderer)
    };
    let report = generate_report(&template, &map, renderer.as_ref())
        .with_context(|| format!("fill template {}", request.template.display()))?;
    let written = write_report(&request.output_dir, form.record_index, &report)
        .context("write report")?;

    let rendering_error = match &report.rendering {
        Rendering::Available(_) => None,
        Rendering::Unavailable { reason } => Some(reason.clone()),
    };
    Ok(FillOutcome {
        template: request.template.clone(),
        record_index: form.record_index,
        record_count,
        written,
        stats: report.stats,
        rendering_error,
        unresolved: report.unresolved,
    })
}

/// Lists the template's tokens and how each would be filled.
///
/// Without a data selection, record tokens are reported as unchecked.
pub fn token_report(
    template: &Path,
    data: Option<&DataSelection>,
    config: &AppConfig,
) -> Result<TokenReport> {
    let document = TemplateDocument::open(template)
        .with_context(|| format!("open template {}", template.display()))?;
    let record_map = match data {
        Some(selection) => {
            let (record, _) = load_record(selection, config)?;
            Some(resolve(&record, &MetadataFields::default(), &config.doctors))
        }
        None => None,
    };

    let tokens = document
        .placeholders()
        .into_iter()
        .map(|token| {
            let source = classify_token(&token, record_map.as_ref());
            TokenStatus { token, source }
        })
        .collect();
    Ok(TokenReport {
        template: template.to_path_buf(),
        tokens,
    })
}

fn classify_token(token: &PlaceholderToken, record_map: Option<&ReplacementMap>) -> TokenSource {
    let in_record = |map: &ReplacementMap| {
        map.section(ReplacementSection::Record)
            .any(|(existing, _)| existing == token)
    };
    match record_map {
        Some(map) if in_record(map) => TokenSource::Record,
        _ if reserved::METADATA_FIELDS.contains(&token.name()) => TokenSource::Metadata,
        Some(_) => TokenSource::Unresolved,
        None => TokenSource::Unchecked,
    }
}

/// Reads the consent and next-visit answers of a completed report.
pub fn inspect_document(path: &Path) -> Result<InspectReport> {
    let document = TemplateDocument::open(path)
        .with_context(|| format!("open document {}", path.display()))?;
    Ok(InspectReport {
        document: path.to_path_buf(),
        checkboxes: form_checkboxes(&document).len(),
        consent: consent_state(&document),
        next_visits: next_visit_kinds(&document),
    })
}
