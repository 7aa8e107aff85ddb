//! Document log HTTP handlers.
//!
//! The log is read-only over HTTP; records are only created by the
//! generation endpoints.

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use serde::Deserialize;
use tracing::debug;
use utoipa::IntoParams;

use l4docs_core::{DocumentDetail, DocumentSummary, DEFAULT_LIST_LIMIT};

use crate::{ApiError, AppState};

fn default_limit() -> u32 {
    DEFAULT_LIST_LIMIT as u32
}

/// Query parameters for listing generated documents.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListDocumentsQuery {
    /// Page size (default 50, capped by `LIST_MAX_LIMIT`)
    #[serde(default = "default_limit")]
    pub limit: u32,
    /// Records to skip (default 0)
    #[serde(default)]
    pub offset: u32,
}

/// List generated documents, newest first.
///
/// # Returns
/// - 200 OK with `[{id, kind, principal_name, created_at}]`
/// - 400 Bad Request if `limit` or `offset` is not a non-negative integer
#[utoipa::path(get, path = "/documentos", tag = "Documents",
    params(ListDocumentsQuery),
    responses((status = 200, description = "Newest records first", body = [DocumentSummary])))]
pub async fn list_documents(
    State(state): State<AppState>,
    query: Result<Query<ListDocumentsQuery>, QueryRejection>,
) -> Result<Json<Vec<DocumentSummary>>, ApiError> {
    let Query(query) = query?;
    let limit = i64::from(query.limit).min(state.list_max_limit);
    let offset = i64::from(query.offset);

    let records = state.documents.list(limit, offset).await?;
    debug!(
        subsystem = "api",
        op = "list_documents",
        limit,
        offset,
        result_count = records.len(),
        "Listed documents"
    );
    Ok(Json(records.into_iter().map(DocumentSummary::from).collect()))
}

/// Get one generated document's record, including its payload.
///
/// # Returns
/// - 200 OK with `{id, kind, principal_name, payload, created_at}`
/// - 404 Not Found if no record has this id
#[utoipa::path(get, path = "/documentos/{id}", tag = "Documents",
    params(("id" = i64, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record detail", body = DocumentDetail),
        (status = 404, description = "No such record")))]
pub async fn get_document(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DocumentDetail>, ApiError> {
    let Path(id) = id?;
    let record = state
        .documents
        .get(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("document {} not found", id)))?;
    Ok(Json(record.into()))
}
