//! Template and data fixtures written to a temporary directory.

#![allow(dead_code)]

use std::fs;
use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use informe_docx::TemplateDocument;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

pub fn paragraph(text: &str) -> String {
    format!(r#"<w:p><w:r><w:t xml:space="preserve">{text}</w:t></w:r></w:p>"#)
}

/// A single-row table, one paragraph per cell.
pub fn table_row(cells: &[&str]) -> String {
    let cells: String = cells
        .iter()
        .map(|text| format!("<w:tc>{}</w:tc>", paragraph(text)))
        .collect();
    format!("<w:tbl><w:tr>{cells}</w:tr></w:tbl>")
}

/// A paragraph of legacy form checkboxes; `true` marks an explicit `w:val="0"`.
pub fn checkbox_paragraph(boxes: &[(&str, bool)]) -> String {
    let runs: String = boxes
        .iter()
        .map(|(name, unchecked)| {
            let checked = if *unchecked {
                r#"<w:checked w:val="0"/>"#
            } else {
                "<w:checked/>"
            };
            format!(
                r#"<w:r><w:fldChar w:fldCharType="begin"><w:ffData><w:name w:val="{name}"/><w:checkBox><w:sizeAuto/>{checked}</w:checkBox></w:ffData></w:fldChar></w:r>"#
            )
        })
        .collect();
    format!("<w:p>{runs}</w:p>")
}

pub fn docx(body: &str) -> Vec<u8> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, content) in [
        ("[Content_Types].xml", CONTENT_TYPES_XML),
        ("_rels/.rels", RELS_XML),
        ("word/document.xml", document.as_str()),
    ] {
        writer.start_file(name, options).expect("start entry");
        writer.write_all(content.as_bytes()).expect("write entry");
    }
    writer.finish().expect("finish archive").into_inner()
}

/// Writes a package built from `body` and returns its path.
pub fn write_docx(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, docx(body)).expect("write template");
    path
}

pub fn write_text(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("write data");
    path
}

/// Block texts of a package on disk, in document order.
pub fn block_texts(path: &Path) -> Vec<String> {
    TemplateDocument::open(path)
        .expect("open package")
        .block_texts()
        .into_iter()
        .map(|block| block.text)
        .collect()
}
