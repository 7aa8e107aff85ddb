//! OpenAPI document served at `/openapi.json` and browsed at `/docs`.

use utoipa::OpenApi;

use l4docs_core::{
    AcknowledgmentPayload, ContractPayload, DeclarationPayload, DocumentDetail, DocumentKind,
    DocumentSummary, PowerOfAttorneyPayload,
};

use crate::error::ErrorBody;
use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "L4 Ativos Document API",
        version = "2026.10.0",
        description = "Generates court-claim assignment documents from Word templates and logs every generation"
    ),
    paths(
        handlers::health::root,
        handlers::health::health_check,
        handlers::generate::generate_contract,
        handlers::generate::generate_power_of_attorney,
        handlers::generate::generate_acknowledgment,
        handlers::generate::generate_declaration,
        handlers::documents::list_documents,
        handlers::documents::get_document,
    ),
    components(schemas(
        ContractPayload,
        PowerOfAttorneyPayload,
        AcknowledgmentPayload,
        DeclarationPayload,
        DocumentKind,
        DocumentSummary,
        DocumentDetail,
        ErrorBody,
    )),
    tags(
        (name = "Generate", description = "Document generation"),
        (name = "Documents", description = "Generated document log"),
        (name = "System", description = "Liveness and health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_route_is_documented() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/health",
            "/documentos",
            "/documentos/{id}",
            "/gerar/contrato",
            "/gerar/procuracao",
            "/gerar/ciencia",
            "/gerar/declaracao",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
