//! In-memory substitution of `{{ placeholders }}` in Word documents.
//!
//! A `.docx` file is a zip container of XML parts. Word often splits text the
//! user typed as one placeholder across several runs, e.g.
//! `{{ Estado</w:t></w:r><w:r><w:t> Civil }}`, so a placeholder is matched
//! across markup and the markup inside it is discarded when it is replaced.
//! The markup between two characters of the same paragraph is always a
//! balanced run boundary, so dropping it keeps the part well formed.

use std::io::{Cursor, Read, Write};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use tracing::trace;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use l4docs_core::{Error, FieldValues, Result};

/// Main body part every word-processing document must contain.
pub const DOCUMENT_PART: &str = "word/document.xml";

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)\{(?:<[^>]*>)*\{(.*?)\}(?:<[^>]*>)*\}")
            .expect("placeholder pattern is valid")
    })
}

fn markup_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("markup pattern is valid"))
}

/// Parts whose text carries placeholders.
pub fn is_text_part(name: &str) -> bool {
    if name == DOCUMENT_PART || name == "word/footnotes.xml" || name == "word/endnotes.xml" {
        return true;
    }
    name.strip_prefix("word/")
        .map(|rest| {
            (rest.starts_with("header") || rest.starts_with("footer"))
                && rest.ends_with(".xml")
                && !rest.contains('/')
        })
        .unwrap_or(false)
}

/// Escape a value for use as XML character data.
pub fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

/// Replace every known placeholder in one XML part.
///
/// Returns the new text and the number of replacements. Placeholders with no
/// value are left exactly as they were.
pub fn substitute_placeholders(xml: &str, values: &FieldValues) -> (String, usize) {
    let mut replaced = 0usize;
    let output = placeholder_regex().replace_all(xml, |caps: &Captures<'_>| {
        let inner = markup_regex().replace_all(&caps[1], "");
        let name = inner.trim();
        match values.get(name) {
            Some(value) => {
                replaced += 1;
                trace!(placeholder = name, "substituted placeholder");
                escape_xml(value)
            }
            None => caps[0].to_string(),
        }
    });
    (output.into_owned(), replaced)
}

/// Render a template container with `values`, returning the new container bytes.
///
/// Fails when the bytes are not a zip container or lack [`DOCUMENT_PART`].
pub fn render_docx(template: &[u8], values: &FieldValues) -> Result<(Vec<u8>, usize)> {
    let mut archive = ZipArchive::new(Cursor::new(template))
        .map_err(|e| Error::Template(format!("template is not a .docx container: {}", e)))?;

    if !archive.file_names().any(|name| name == DOCUMENT_PART) {
        return Err(Error::Template(format!(
            "template has no {} part",
            DOCUMENT_PART
        )));
    }

    let mut writer = ZipWriter::new(Cursor::new(Vec::with_capacity(template.len())));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut replaced = 0usize;

    for index in 0..archive.len() {
        let mut entry = archive.by_index(index)?;
        let name = entry.name().to_string();

        if entry.is_dir() {
            writer.add_directory(name, options)?;
            continue;
        }

        let mut contents = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut contents)?;

        if is_text_part(&name) {
            let xml = String::from_utf8(contents)
                .map_err(|e| Error::Template(format!("{} is not UTF-8: {}", name, e)))?;
            let (rendered, count) = substitute_placeholders(&xml, values);
            replaced += count;
            contents = rendered.into_bytes();
        }

        writer.start_file(name, options)?;
        writer.write_all(&contents)?;
    }

    let bytes = writer.finish()?.into_inner();
    Ok((bytes, replaced))
}
