//! Minimal `.docx` builders for tests.
//!
//! Always compiled so integration tests in other crates can build templates
//! on the fly instead of shipping binary fixtures.

use std::io::{Cursor, Read, Write};
use std::path::Path;

use zip::write::FileOptions;
use zip::{ZipArchive, ZipWriter};

use l4docs_core::{field_map, DocumentKind, Result};

use crate::docx::DOCUMENT_PART;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/></Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/></Relationships>"#;

/// A minimal word-processing container whose body is `body_xml`.
pub fn docx_with_body(body_xml: &str) -> Result<Vec<u8>> {
    let document = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{}</w:body></w:document>"#,
        body_xml
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = FileOptions::default();
    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES),
        ("_rels/.rels", ROOT_RELS),
        (DOCUMENT_PART, document.as_str()),
    ] {
        writer.start_file(name, options)?;
        writer.write_all(contents.as_bytes())?;
    }
    Ok(writer.finish()?.into_inner())
}

/// A template for `kind` with one paragraph `<placeholder>: {{ <placeholder> }}`
/// per mapping entry.
pub fn template_for_kind(kind: DocumentKind) -> Result<Vec<u8>> {
    let body: String = field_map(kind)
        .iter()
        .map(|entry| {
            format!(
                "<w:p><w:r><w:t xml:space=\"preserve\">{}: {{{{ {} }}}}</w:t></w:r></w:p>",
                entry.placeholder, entry.placeholder
            )
        })
        .collect();
    docx_with_body(&body)
}

/// Write every kind's template into `dir` under its fixed file name.
pub fn write_templates(dir: &Path) -> Result<()> {
    for kind in DocumentKind::ALL {
        std::fs::write(dir.join(kind.template_file()), template_for_kind(kind)?)?;
    }
    Ok(())
}

/// Read one part of a container as text.
pub fn read_part(docx: &[u8], name: &str) -> Result<String> {
    let mut archive = ZipArchive::new(Cursor::new(docx))?;
    let mut entry = archive.by_name(name)?;
    let mut text = String::new();
    entry.read_to_string(&mut text)?;
    Ok(text)
}
