//! Console summaries.

use std::path::PathBuf;

use informe_cli::summary::{describe_fill, describe_inspect, doctor_table, token_table};
use informe_cli::types::{FillOutcome, InspectReport, TokenReport, TokenSource, TokenStatus};
use informe_core::{FillStats, WrittenReport};
use informe_docx::{ConsentState, NextVisitKind};
use informe_model::{DoctorEntry, DoctorRegistry, PlaceholderToken};

fn outcome(rendering: Option<&str>, rendering_error: Option<&str>) -> FillOutcome {
    FillOutcome {
        template: PathBuf::from("plantillas/informe.docx"),
        record_index: 1,
        record_count: 12,
        written: WrittenReport {
            document: PathBuf::from("salida/informe_col1.docx"),
            rendering: rendering.map(PathBuf::from),
        },
        stats: FillStats {
            paragraphs_rewritten: 2,
            cells_rewritten: 1,
            occurrences: vec![
                (PlaceholderToken::for_field("Nombre"), 2),
                (PlaceholderToken::for_field("Doctor"), 1),
            ],
        },
        rendering_error: rendering_error.map(str::to_string),
        unresolved: Vec::new(),
    }
}

#[test]
fn fill_summary_with_rendering() {
    let text = describe_fill(&outcome(Some("salida/informe_col1.pdf"), None));
    insta::assert_snapshot!(text, @r"
    Template: plantillas/informe.docx
    Record: 1 (12 in table)
    Document: salida/informe_col1.docx
    Rendering: salida/informe_col1.pdf
    Replacements: 3 (2 paragraphs, 1 cells)
    ");
}

#[test]
fn fill_summary_without_rendering() {
    let text = describe_fill(&outcome(None, Some("converter not found")));
    assert!(text.contains("Rendering: unavailable (converter not found)\n"));
}

#[test]
fn inspect_summary() {
    let report = InspectReport {
        document: PathBuf::from("informe_col3.docx"),
        checkboxes: 8,
        consent: ConsentState::Refused,
        next_visits: vec![Some(NextVisitKind::FinalDefinitive), None],
    };
    insta::assert_snapshot!(describe_inspect(&report), @r"
    Document: informe_col3.docx
    Checkboxes: 8
    Consent: no
    Next visit 1: Final definitive
    Next visit 2: none
    ");
}

#[test]
fn token_table_lists_sources() {
    let report = TokenReport {
        template: PathBuf::from("informe.docx"),
        tokens: vec![
            TokenStatus {
                token: PlaceholderToken::for_field("Nombre"),
                source: TokenSource::Record,
            },
            TokenStatus {
                token: PlaceholderToken::for_field("Pendiente"),
                source: TokenSource::Unresolved,
            },
        ],
    };
    let mut table = token_table(&report);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("{{Nombre}}"));
    assert!(rendered.contains("unresolved"));
    assert_eq!(report.unresolved_count(), 1);
}

#[test]
fn doctor_table_lists_credentials() {
    let registry = DoctorRegistry::new(vec![
        DoctorEntry::new("Dra. Elena Ruiz", "41/12345"),
        DoctorEntry::new("Dr. Pablo Gil", "46/987654"),
    ]);
    let mut table = doctor_table(&registry);
    table.force_no_tty();
    let rendered = table.to_string();
    assert!(rendered.contains("Dr. Pablo Gil"));
    assert!(rendered.contains("41/12345"));
    assert_eq!(table.row_count(), 2);
}
