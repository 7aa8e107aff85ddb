//! Template renderer: template file + field values -> new output file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::fs;
use tracing::{info, warn};

use l4docs_core::{DocumentKind, Error, FieldValues, Result};

use crate::docx::render_docx;
use crate::output::OutputDirectory;

/// A document written to the output directory.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub path: PathBuf,
    /// The bytes written to `path`.
    pub bytes: Vec<u8>,
}

/// Renders the fixed per-kind templates into the output directory.
#[derive(Debug, Clone)]
pub struct DocxRenderer {
    templates_dir: PathBuf,
    output: OutputDirectory,
}

impl DocxRenderer {
    /// Create a renderer reading templates from `templates_dir`.
    pub fn new(templates_dir: impl Into<PathBuf>, output: OutputDirectory) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            output,
        }
    }

    /// Path of `kind`'s template.
    pub fn template_path(&self, kind: DocumentKind) -> PathBuf {
        self.templates_dir.join(kind.template_file())
    }

    /// The output directory documents are written to.
    pub fn output(&self) -> &OutputDirectory {
        &self.output
    }

    /// Kinds whose template file is absent. Logged at startup; not fatal.
    pub async fn missing_templates(&self) -> Vec<DocumentKind> {
        let mut missing = Vec::new();
        for kind in DocumentKind::ALL {
            let path = self.template_path(kind);
            if !fs::try_exists(&path).await.unwrap_or(false) {
                warn!(
                    subsystem = "render",
                    component = "docx",
                    kind = %kind,
                    template_path = %path.display(),
                    "Template file not found"
                );
                missing.push(kind);
            }
        }
        missing
    }

    /// Render `kind`'s template with `values`.
    pub async fn render_kind(
        &self,
        kind: DocumentKind,
        values: &FieldValues,
    ) -> Result<RenderedDocument> {
        self.render(&self.template_path(kind), kind.file_prefix(), values)
            .await
    }

    /// Load `template_path`, substitute `values`, and write a new
    /// `<file_prefix>_<hex8>.docx` into the output directory.
    pub async fn render(
        &self,
        template_path: &Path,
        file_prefix: &str,
        values: &FieldValues,
    ) -> Result<RenderedDocument> {
        let start = Instant::now();

        let template = fs::read(template_path).await.map_err(|e| {
            Error::Template(format!(
                "cannot read template {}: {}",
                template_path.display(),
                e
            ))
        })?;

        let (rendered, replaced) = render_docx(&template, values)?;
        let path = self.output.write_new(file_prefix, &rendered).await?;

        info!(
            subsystem = "render",
            component = "docx",
            op = "render",
            template_path = %template_path.display(),
            output_path = %path.display(),
            replaced_count = replaced,
            size_bytes = rendered.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Document rendered"
        );
        Ok(RenderedDocument {
            path,
            bytes: rendered,
        })
    }
}
