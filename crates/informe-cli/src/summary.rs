use std::fmt::Write as _;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use informe_model::DoctorRegistry;

use crate::config::ConfigSource;
use crate::types::{FillOutcome, InspectReport, TokenReport, TokenSource};

pub fn print_fill_summary(outcome: &FillOutcome) {
    print!("{}", describe_fill(outcome));
    if !outcome.stats.occurrences.is_empty() {
        println!("{}", replacement_table(outcome));
    }
    if !outcome.unresolved.is_empty() {
        eprintln!("Unresolved placeholders (left as-is):");
        for token in &outcome.unresolved {
            eprintln!("- {token}");
        }
    }
}

/// Header lines for a fill result.
pub fn describe_fill(outcome: &FillOutcome) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Template: {}", outcome.template.display());
    let _ = writeln!(
        text,
        "Record: {} ({} in table)",
        outcome.record_index, outcome.record_count
    );
    let _ = writeln!(text, "Document: {}", outcome.written.document.display());
    match (&outcome.written.rendering, &outcome.rendering_error) {
        (Some(path), _) => {
            let _ = writeln!(text, "Rendering: {}", path.display());
        }
        (None, Some(reason)) => {
            let _ = writeln!(text, "Rendering: unavailable ({reason})");
        }
        (None, None) => {
            let _ = writeln!(text, "Rendering: unavailable");
        }
    }
    let _ = writeln!(
        text,
        "Replacements: {} ({} paragraphs, {} cells)",
        outcome.stats.total_replacements(),
        outcome.stats.paragraphs_rewritten,
        outcome.stats.cells_rewritten
    );
    text
}

pub fn replacement_table(outcome: &FillOutcome) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Placeholder"), header_cell("Replaced")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (token, count) in &outcome.stats.occurrences {
        table.add_row(vec![Cell::new(token), count_cell(*count, Color::Green)]);
    }
    table
}

pub fn print_token_report(report: &TokenReport) {
    println!("Template: {}", report.template.display());
    if report.tokens.is_empty() {
        println!("No placeholders found.");
        return;
    }
    println!("{}", token_table(report));
    let unresolved = report.unresolved_count();
    if unresolved > 0 {
        eprintln!("{unresolved} placeholder(s) have no matching column or report field.");
    }
}

pub fn token_table(report: &TokenReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Placeholder"), header_cell("Source")]);
    apply_table_style(&mut table);
    for status in &report.tokens {
        table.add_row(vec![Cell::new(&status.token), source_cell(status.source)]);
    }
    table
}

fn source_cell(source: TokenSource) -> Cell {
    match source {
        TokenSource::Record => Cell::new(source.label()).fg(Color::Green),
        TokenSource::Metadata => Cell::new(source.label()).fg(Color::Blue),
        TokenSource::Unresolved => Cell::new(source.label())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        TokenSource::Unchecked => dim_cell(source.label()),
    }
}

pub fn print_doctor_table(registry: &DoctorRegistry, source: &ConfigSource) {
    println!("Config: {source}");
    if registry.is_empty() {
        println!("No doctors configured.");
        return;
    }
    println!("{}", doctor_table(registry));
}

pub fn doctor_table(registry: &DoctorRegistry) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header_cell("Doctor"), header_cell("Credential")]);
    apply_table_style(&mut table);
    for entry in registry.entries() {
        table.add_row(vec![
            Cell::new(&entry.name).add_attribute(Attribute::Bold),
            Cell::new(&entry.credential),
        ]);
    }
    table
}

pub fn print_inspect_report(report: &InspectReport) {
    print!("{}", describe_inspect(report));
}

/// Plain-text answers read from a completed report.
pub fn describe_inspect(report: &InspectReport) -> String {
    let mut text = String::new();
    let _ = writeln!(text, "Document: {}", report.document.display());
    let _ = writeln!(text, "Checkboxes: {}", report.checkboxes);
    let _ = writeln!(text, "Consent: {}", report.consent.label());
    if report.next_visits.is_empty() {
        let _ = writeln!(text, "Next visit: -");
    }
    for (position, kind) in report.next_visits.iter().enumerate() {
        let label = kind.as_ref().map_or("none", |kind| kind.label());
        let _ = writeln!(text, "Next visit {}: {label}", position + 1);
    }
    text
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(100);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).fg(Color::DarkGrey)
}
