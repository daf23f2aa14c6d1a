//! In-memory `.docx` fixtures.

#![allow(dead_code)]

use std::io::{Cursor, Read, Write};

use informe_docx::TemplateDocument;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

pub const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:style w:styleId="Normal"/></w:styles>"#;

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// Wraps body content in a `w:document` element.
pub fn document_xml(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    )
}

/// A paragraph with one run per entry, each run italic so formatting is visible.
pub fn paragraph(runs: &[&str]) -> String {
    let runs: String = runs
        .iter()
        .map(|text| format!(r#"<w:r><w:rPr><w:i/></w:rPr><w:t xml:space="preserve">{text}</w:t></w:r>"#))
        .collect();
    format!("<w:p><w:pPr><w:jc w:val=\"left\"/></w:pPr>{runs}</w:p>")
}

/// A table whose cells each hold one single-run paragraph.
pub fn table(rows: &[&[&str]]) -> String {
    let rows: String = rows
        .iter()
        .map(|cells| {
            let cells: String = cells
                .iter()
                .map(|text| format!("<w:tc><w:tcPr/>{}</w:tc>", paragraph(&[text])))
                .collect();
            format!("<w:tr>{cells}</w:tr>")
        })
        .collect();
    format!("<w:tbl><w:tblPr/>{rows}</w:tbl>")
}

/// A table with a single cell holding raw inner content.
pub fn table_with_cell(content: &str) -> String {
    format!("<w:tbl><w:tr><w:tc>{content}</w:tc></w:tr></w:tbl>")
}

/// Builds a package with the given `word/document.xml` content.
pub fn docx_from_document(document: &str) -> Vec<u8> {
    build_archive(&[
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", RELS_XML),
        ("word/document.xml", document),
        ("word/styles.xml", STYLES_XML),
    ])
}

/// Builds a package around body content.
pub fn docx(body: &str) -> Vec<u8> {
    docx_from_document(&document_xml(body))
}

pub fn build_archive(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in entries {
        writer.start_file(*name, options).expect("start entry");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

/// Reads one entry of a package as text.
pub fn read_entry(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open archive");
    let mut entry = archive.by_name(name).expect("entry present");
    let mut content = String::new();
    entry.read_to_string(&mut content).expect("read entry");
    content
}

/// Block texts of a serialized package, in document order.
pub fn block_texts(bytes: &[u8]) -> Vec<String> {
    TemplateDocument::load(bytes.to_vec())
        .expect("load package")
        .block_texts()
        .into_iter()
        .map(|block| block.text)
        .collect()
}
