//! Router assembly and HTTP middleware.

use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, Request},
    routing::{get, post},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    trace::TraceLayer,
};
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use uuid::Uuid;

use crate::handlers::{documents, generate, health};
use crate::openapi::ApiDoc;
use crate::AppState;

/// Largest accepted request body. Payloads are a few dozen short strings.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Generates time-ordered UUIDv7 request correlation IDs.
#[derive(Clone, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().to_string().parse().ok()?;
        Some(RequestId::new(id))
    }
}

/// CORS policy for `origins`.
///
/// An empty list allows any origin without credentials. Otherwise only the
/// listed origins are allowed, with credentials. Invalid entries are logged
/// and skipped.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .expose_headers([header::CONTENT_DISPOSITION])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return layer.allow_origin(Any).allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(e) => {
                warn!("Invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(allowed))
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

/// Build the application router.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // Liveness
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        // OpenAPI / Swagger UI
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        // Generation
        .route("/gerar/contrato", post(generate::generate_contract))
        .route("/gerar/procuracao", post(generate::generate_power_of_attorney))
        .route("/gerar/ciencia", post(generate::generate_acknowledgment))
        .route("/gerar/declaracao", post(generate::generate_declaration))
        // Document log
        .route("/documentos", get(documents::list_documents))
        .route("/documentos/:id", get(documents::get_document))
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7))
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}
