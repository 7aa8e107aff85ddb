//! Document generation handlers.
//!
//! Every kind runs the same pipeline, aborting on the first failure:
//! validate -> map fields -> render -> append to the log -> return the file.
//! Render and append are not transactional: if the append fails the rendered
//! file stays on disk without a record.

use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value as JsonValue;
use tracing::info;

use l4docs_core::{
    build_field_values, parse_payload, AcknowledgmentPayload, ContractPayload, DeclarationPayload,
    DocumentPayload, Error, NewDocumentRecord, PowerOfAttorneyPayload, DOCX_CONTENT_TYPE,
};

use crate::{ApiError, AppState};

/// Run the generation pipeline for payload type `P`.
pub async fn generate<P: DocumentPayload>(
    state: &AppState,
    body: JsonValue,
) -> Result<Response, ApiError> {
    let start = Instant::now();
    let kind = P::KIND;

    let payload: P = parse_payload(&body)?;
    let principal_name = payload.principal_name().to_string();
    let validated = serde_json::to_value(&payload).map_err(Error::from)?;

    let values = build_field_values(kind, &validated)?;
    let document = state.renderer.render_kind(kind, &values).await?;

    let id = state
        .documents
        .append(NewDocumentRecord {
            kind,
            principal_name: principal_name.clone(),
            payload: validated,
            output_path: document.path.display().to_string(),
        })
        .await?;

    info!(
        subsystem = "api",
        component = "generate",
        op = "generate",
        kind = %kind,
        document_id = id,
        output_path = %document.path.display(),
        size_bytes = document.bytes.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Document generated"
    );

    let disposition = HeaderValue::from_str(&content_disposition(
        &kind.download_filename(&principal_name),
    ))
    .map_err(|e| Error::Internal(format!("invalid download name: {}", e)))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(DOCX_CONTENT_TYPE),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document.bytes,
    )
        .into_response())
}

/// `attachment` disposition for `filename`.
///
/// Names made only of URL-safe characters are sent as a plain quoted
/// `filename`; anything else gets an ASCII fallback plus an RFC 5987
/// `filename*` with the UTF-8 name percent-encoded.
pub fn content_disposition(filename: &str) -> String {
    let encoded = urlencoding::encode(filename);
    if encoded == filename {
        return format!("attachment; filename=\"{}\"", filename);
    }

    let fallback: String = filename
        .chars()
        .map(|c| {
            if (c.is_ascii_graphic() || c == ' ') && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!(
        "attachment; filename=\"{}\"; filename*=utf-8''{}",
        fallback, encoded
    )
}

/// Generate a credit assignment contract.
#[utoipa::path(post, path = "/gerar/contrato", tag = "Generate",
    request_body = ContractPayload,
    responses(
        (status = 200, description = "Generated contract",
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Template, render or log failure")))]
pub async fn generate_contract(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    generate::<ContractPayload>(&state, body).await
}

/// Generate a power of attorney.
#[utoipa::path(post, path = "/gerar/procuracao", tag = "Generate",
    request_body = PowerOfAttorneyPayload,
    responses(
        (status = 200, description = "Generated power of attorney",
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Template, render or log failure")))]
pub async fn generate_power_of_attorney(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    generate::<PowerOfAttorneyPayload>(&state, body).await
}

/// Generate a declaration of acknowledgment and agreement.
#[utoipa::path(post, path = "/gerar/ciencia", tag = "Generate",
    request_body = AcknowledgmentPayload,
    responses(
        (status = 200, description = "Generated acknowledgment",
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Template, render or log failure")))]
pub async fn generate_acknowledgment(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    generate::<AcknowledgmentPayload>(&state, body).await
}

/// Generate a declaration of settlement.
#[utoipa::path(post, path = "/gerar/declaracao", tag = "Generate",
    request_body = DeclarationPayload,
    responses(
        (status = 200, description = "Generated declaration",
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
        (status = 422, description = "Invalid payload"),
        (status = 500, description = "Template, render or log failure")))]
pub async fn generate_declaration(
    State(state): State<AppState>,
    body: Result<Json<JsonValue>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(body) = body?;
    generate::<DeclarationPayload>(&state, body).await
}
