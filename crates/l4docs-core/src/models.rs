//! Core data models for l4docs.
//!
//! These types are shared across all l4docs crates: the four document kinds
//! and the persisted document record in its full and public projections.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::error::Error;

/// MIME type of every generated document.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// Extension of generated and template files.
pub const DOCX_EXTENSION: &str = "docx";

// =============================================================================
// DOCUMENT KINDS
// =============================================================================

/// The four fixed document categories the service can generate.
///
/// The serialized form is the tag persisted in the log store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema,
)]
pub enum DocumentKind {
    /// Credit assignment contract (cessão de crédito).
    #[serde(rename = "contrato")]
    Contract,
    /// Power of attorney (procuração ad judicia).
    #[serde(rename = "procuracao")]
    PowerOfAttorney,
    /// Acknowledgment and agreement declaration (declaração de ciência).
    #[serde(rename = "ciencia")]
    Acknowledgment,
    /// Declaration of settlement (declaração de quitação).
    #[serde(rename = "declaracao_quitacao")]
    DeclarationOfSettlement,
}

impl DocumentKind {
    /// Every kind, in route order.
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Contract,
        DocumentKind::PowerOfAttorney,
        DocumentKind::Acknowledgment,
        DocumentKind::DeclarationOfSettlement,
    ];

    /// Tag stored in the `kind` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Contract => "contrato",
            DocumentKind::PowerOfAttorney => "procuracao",
            DocumentKind::Acknowledgment => "ciencia",
            DocumentKind::DeclarationOfSettlement => "declaracao_quitacao",
        }
    }

    /// Last path segment of the generation route (`/gerar/<segment>`).
    pub fn route_segment(&self) -> &'static str {
        match self {
            DocumentKind::DeclarationOfSettlement => "declaracao",
            other => other.as_str(),
        }
    }

    /// Prefix of the randomized output file name.
    pub fn file_prefix(&self) -> &'static str {
        self.route_segment()
    }

    /// Prefix of the suggested download file name.
    pub fn download_prefix(&self) -> &'static str {
        match self {
            DocumentKind::Contract => "Contrato",
            DocumentKind::PowerOfAttorney => "Procuracao",
            DocumentKind::Acknowledgment => "Ciencia",
            DocumentKind::DeclarationOfSettlement => "Declaracao",
        }
    }

    /// File name of the kind's template inside the templates directory.
    pub fn template_file(&self) -> &'static str {
        match self {
            DocumentKind::Contract => "template-cessao-rpv.docx",
            DocumentKind::PowerOfAttorney => "template-procuracao-adjudicia.docx",
            DocumentKind::Acknowledgment => "template-dec-ciencia-concord.docx",
            DocumentKind::DeclarationOfSettlement => "template-dec-quitacao.docx",
        }
    }

    /// Human-readable download name, e.g. `Contrato_Maria_da_Silva.docx`.
    pub fn download_filename(&self, principal_name: &str) -> String {
        format!(
            "{}_{}.{}",
            self.download_prefix(),
            principal_name.replace(' ', "_"),
            DOCX_EXTENSION
        )
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| Error::InvalidInput(format!("unknown document kind '{}'", s)))
    }
}

// =============================================================================
// DOCUMENT RECORDS
// =============================================================================

/// A record to append to the document log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocumentRecord {
    pub kind: DocumentKind,
    pub principal_name: String,
    /// Full validated payload; stored serialized and opaque to the store.
    pub payload: JsonValue,
    pub output_path: String,
}

/// A persisted document log entry. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: i64,
    pub kind: DocumentKind,
    pub principal_name: String,
    pub payload: JsonValue,
    pub output_path: String,
    pub created_at: DateTime<Utc>,
}

/// Public listing view of a record: no payload, no output path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentSummary {
    pub id: i64,
    pub kind: DocumentKind,
    pub principal_name: String,
    pub created_at: DateTime<Utc>,
}

/// Detail view of a record: the payload without the internal output path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DocumentDetail {
    pub id: i64,
    pub kind: DocumentKind,
    pub principal_name: String,
    #[schema(value_type = Object)]
    pub payload: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl From<DocumentRecord> for DocumentSummary {
    fn from(record: DocumentRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            principal_name: record.principal_name,
            created_at: record.created_at,
        }
    }
}

impl From<DocumentRecord> for DocumentDetail {
    fn from(record: DocumentRecord) -> Self {
        Self {
            id: record.id,
            kind: record.kind,
            principal_name: record.principal_name,
            payload: record.payload,
            created_at: record.created_at,
        }
    }
}
