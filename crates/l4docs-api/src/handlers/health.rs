//! Liveness endpoints.

use axum::Json;
use serde_json::{json, Value as JsonValue};

/// Message returned by `GET /`.
pub const LIVENESS_MESSAGE: &str = "L4 Ativos - API de Geração de Documentos";

/// Liveness probe kept for the existing front-end.
#[utoipa::path(get, path = "/", tag = "System",
    responses((status = 200, description = "Service is up")))]
pub async fn root() -> Json<JsonValue> {
    Json(json!({ "message": LIVENESS_MESSAGE }))
}

#[utoipa::path(get, path = "/health", tag = "System",
    responses((status = 200, description = "Service is healthy")))]
pub async fn health_check() -> Json<JsonValue> {
    Json(json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
