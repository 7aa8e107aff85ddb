//! # l4docs-render
//!
//! Word template rendering for l4docs.
//!
//! This crate provides:
//! - `{{ placeholder }}` substitution inside `.docx` containers
//! - An output directory that never overwrites an existing file
//! - The per-kind renderer used by the generation handlers
//!
//! ## Example
//!
//! ```rust,ignore
//! use l4docs_render::{DocxRenderer, OutputDirectory};
//!
//! let output = OutputDirectory::new("output");
//! output.ensure_exists().await?;
//! let renderer = DocxRenderer::new("templates", output);
//! let document = renderer.render_kind(DocumentKind::Contract, &values).await?;
//! ```

pub mod docx;
pub mod output;
pub mod renderer;

// Always compiled so integration tests in other crates can build templates
pub mod test_fixtures;

pub use docx::{render_docx, substitute_placeholders, DOCUMENT_PART};
pub use output::{unique_filename, OutputDirectory};
pub use renderer::{DocxRenderer, RenderedDocument};
