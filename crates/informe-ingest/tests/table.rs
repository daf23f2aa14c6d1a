use std::fs;
use std::io::{Cursor, Write};
use std::path::PathBuf;

use informe_ingest::{IngestError, IngestOptions, RecordLayout, read_table};
use informe_model::CellValue;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const WORKBOOK_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="Sheet1" sheetId="1" r:id="rId1"/></sheets></workbook>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/></Relationships>"#;

fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("write file");
    path
}

#[test]
fn reads_csv_records_with_nulls() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "casos.csv",
        "Nombre,Fecha siniestro,Lesiones\n\
         Ana Ruiz,01/02/2024 Hora: 10:30,\n\
         Luis Mora,15/03/2024,NaN\n",
    );
    let table = read_table(&path, &IngestOptions::default()).expect("read csv");
    assert_eq!(table.fields, vec!["Nombre", "Fecha siniestro", "Lesiones"]);
    assert_eq!(table.record_count(), 2);

    let first = table.record(0).expect("record 0");
    assert_eq!(
        first.get("Fecha siniestro"),
        Some(&CellValue::from("01/02/2024 Hora: 10:30"))
    );
    assert_eq!(first.get("Lesiones"), Some(&CellValue::Missing));

    let second = table.record(1).expect("record 1");
    assert_eq!(second.get("Lesiones"), Some(&CellValue::Missing));
}

#[test]
fn csv_cell_text_is_kept_verbatim() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "casos.csv",
        "Nombre,Fecha siniestro,Lesiones\n\
         \"  Ana\",\"01/02/2024 Hora: \", NaN \n",
    );
    let record = read_table(&path, &IngestOptions::default())
        .expect("read csv")
        .record(0)
        .expect("record 0");
    assert_eq!(record.get("Nombre"), Some(&CellValue::from("  Ana")));
    assert_eq!(
        record.get("Fecha siniestro"),
        Some(&CellValue::from("01/02/2024 Hora: "))
    );
    assert_eq!(record.get("Lesiones"), Some(&CellValue::Missing));
}

#[test]
fn custom_null_markers_replace_defaults() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "casos.csv", "A,B\nNaN,-\n");
    let options = IngestOptions::default().with_null_markers(vec!["-".to_string()]);
    let record = read_table(&path, &options)
        .expect("read csv")
        .record(0)
        .expect("record 0");
    assert_eq!(record.get("A"), Some(&CellValue::from("NaN")));
    assert_eq!(record.get("B"), Some(&CellValue::Missing));
}

#[test]
fn reads_transposed_csv() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "transpuesto.csv",
        ",0,1,2\nNombre,Ana,Luis,Eva\nEdad,40,,33\n",
    );
    let options = IngestOptions::default().with_layout(RecordLayout::Columns);
    let table = read_table(&path, &options).expect("read csv");
    assert_eq!(table.record_count(), 3);
    let record = table.record(2).expect("record 2");
    assert_eq!(record.get("Nombre"), Some(&CellValue::from("Eva")));
    assert_eq!(record.get("Edad"), Some(&CellValue::from("33")));
    let record = table.record(1).expect("record 1");
    assert_eq!(record.get("Edad"), Some(&CellValue::Missing));
}

#[test]
fn reads_json_records() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(
        &dir,
        "casos.json",
        r#"[{"Nombre": "Ana", "Edad": 40, "Alta": null}, {"Nombre": "Luis", "Peso": 71.5}]"#,
    );
    let table = read_table(&path, &IngestOptions::default()).expect("read json");
    assert_eq!(table.record_count(), 2);
    assert_eq!(table.fields.len(), 4);
    let first = table.record(0).expect("record 0");
    assert_eq!(first.get("Edad"), Some(&CellValue::Integer(40)));
    assert_eq!(first.get("Alta"), Some(&CellValue::Missing));
    assert_eq!(first.get("Peso"), Some(&CellValue::Missing));
    let second = table.record(1).expect("record 1");
    assert_eq!(second.get("Peso"), Some(&CellValue::Float(71.5)));
}

#[test]
fn rejects_non_array_json() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_file(&dir, "casos.json", r#"{"Nombre": "Ana"}"#);
    let err = read_table(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::JsonShape { .. }));
}

#[test]
fn missing_and_unsupported_files() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_table(&dir.path().join("nada.csv"), &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::FileNotFound { .. }));

    let path = write_file(&dir, "casos.txt", "texto");
    let err = read_table(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::UnsupportedFormat { .. }));

    let path = write_file(&dir, "roto.xlsx", "no es un libro");
    let err = read_table(&path, &IngestOptions::default()).unwrap_err();
    assert!(matches!(err, IngestError::XlsxRead { .. }));
}

fn inline(reference: &str, text: &str) -> String {
    format!(r#"<c r="{reference}" t="inlineStr"><is><t xml:space="preserve">{text}</t></is></c>"#)
}

fn number(reference: &str, value: &str) -> String {
    format!(r#"<c r="{reference}"><v>{value}</v></c>"#)
}

fn boolean(reference: &str, value: bool) -> String {
    format!(r#"<c r="{reference}" t="b"><v>{}</v></c>"#, u8::from(value))
}

/// Writes a single-sheet workbook whose rows hold the given cell markup.
fn write_workbook(dir: &TempDir, name: &str, rows: &[Vec<String>]) -> PathBuf {
    let sheet_rows: String = rows
        .iter()
        .enumerate()
        .map(|(idx, cells)| format!(r#"<row r="{}">{}</row>"#, idx + 1, cells.concat()))
        .collect();
    let sheet = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{sheet_rows}</sheetData></worksheet>"#
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (entry, content) in [
        ("xl/workbook.xml", WORKBOOK_XML),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML),
        ("xl/worksheets/sheet1.xml", sheet.as_str()),
    ] {
        writer.start_file(entry, options).expect("start entry");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    let bytes = writer.finish().expect("finish archive").into_inner();
    let path = dir.path().join(name);
    fs::write(&path, bytes).expect("write workbook");
    path
}

#[test]
fn reads_transposed_workbook() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(
        &dir,
        "procesado_transpuesto.xlsx",
        &[
            vec![number("B1", "0"), number("C1", "1")],
            vec![
                inline("A2", "Nombre"),
                inline("B2", "Ana Ruiz"),
                inline("C2", "Luis Gil"),
            ],
            vec![inline("A3", "Edad"), number("B3", "63")],
            vec![inline("A4", "Alta"), boolean("B4", true), inline("C4", "nan")],
        ],
    );
    let options = IngestOptions::default().with_layout(RecordLayout::Columns);
    let table = read_table(&path, &options).expect("read workbook");
    assert_eq!(table.fields, vec!["Nombre", "Edad", "Alta"]);
    assert_eq!(table.record_count(), 2);

    let first = table.record(0).expect("record 0");
    assert_eq!(first.get("Nombre"), Some(&CellValue::from("Ana Ruiz")));
    assert_eq!(first.get("Edad"), Some(&CellValue::Float(63.0)));
    assert_eq!(first.get("Alta"), Some(&CellValue::Boolean(true)));

    let second = table.record(1).expect("record 1");
    assert_eq!(second.get("Edad"), Some(&CellValue::Missing));
    assert_eq!(second.get("Alta"), Some(&CellValue::Missing));
}

#[test]
fn reads_workbook_rows() {
    let dir = TempDir::new().expect("temp dir");
    let path = write_workbook(
        &dir,
        "casos.xlsx",
        &[
            vec![inline("A1", "Nombre"), inline("B1", "Lesiones")],
            vec![inline("A2", "Ana Ruiz"), inline("B2", "Esguince")],
        ],
    );
    let record = read_table(&path, &IngestOptions::default())
        .expect("read workbook")
        .record(0)
        .expect("record 0");
    assert_eq!(record.get("Lesiones"), Some(&CellValue::from("Esguince")));
}
