//! Integration tests for the `POST /gerar/*` endpoints.

mod common;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::Value;

use common::{
    acknowledgment_payload, contract_payload, declaration_payload, power_of_attorney_payload,
    TestApp,
};
use l4docs_core::{
    parse_payload, ContractPayload, DocumentKind, DocumentRecord, DocumentRepository, Error,
    NewDocumentRecord, DOCX_CONTENT_TYPE,
};
use l4docs_render::test_fixtures::read_part;
use l4docs_render::DOCUMENT_PART;

#[tokio::test]
async fn test_contract_creates_one_file_and_one_record() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/gerar/contrato", &contract_payload("Maria da Silva"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.output_files().len(), 1);
    assert_eq!(app.record_count().await, 1);

    let records = app.db.documents.list(10, 0).await.unwrap();
    assert_eq!(records[0].kind, DocumentKind::Contract);
    assert_eq!(records[0].kind.as_str(), "contrato");
    assert_eq!(records[0].principal_name, "Maria da Silva");
    assert_eq!(
        std::path::PathBuf::from(&records[0].output_path),
        app.output_files()[0]
    );
}

#[tokio::test]
async fn test_contract_response_is_docx_download() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/gerar/contrato", &contract_payload("Maria da Silva"))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).unwrap(),
        DOCX_CONTENT_TYPE
    );
    assert_eq!(
        response.headers.get(header::CONTENT_DISPOSITION).unwrap(),
        "attachment; filename=\"Contrato_Maria_da_Silva.docx\""
    );

    // Returned bytes are the file that was written
    let on_disk = std::fs::read(&app.output_files()[0]).unwrap();
    assert_eq!(response.body.as_ref(), on_disk.as_slice());
}

#[tokio::test]
async fn test_contract_document_carries_formatted_values() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/gerar/contrato", &contract_payload("Maria da Silva"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = read_part(&response.body, DOCUMENT_PART).unwrap();
    assert!(body.contains("nome_cedente: Maria da Silva"));
    assert!(body.contains("cpf_cedente: 123.456.789-00"));
    assert!(body.contains("valor_bruto: R$ 1.234,50"));
    assert!(body.contains("valor_liquido: R$ 1.000.000,00"));
    assert!(!body.contains("{{"));
}

#[tokio::test]
async fn test_each_kind_generates_with_its_prefixes() {
    let app = TestApp::new().await;

    let cases: [(&str, Value, &str, &str); 4] = [
        ("/gerar/contrato", contract_payload("Ana Lima"), "contrato_", "Contrato_Ana_Lima.docx"),
        (
            "/gerar/procuracao",
            power_of_attorney_payload("Ana Lima"),
            "procuracao_",
            "Procuracao_Ana_Lima.docx",
        ),
        ("/gerar/ciencia", acknowledgment_payload("Ana Lima"), "ciencia_", "Ciencia_Ana_Lima.docx"),
        (
            "/gerar/declaracao",
            declaration_payload("Ana Lima"),
            "declaracao_",
            "Declaracao_Ana_Lima.docx",
        ),
    ];

    for (uri, payload, file_prefix, download_name) in cases {
        let before = app.output_files();
        let response = app.post_json(uri, &payload).await;
        assert_eq!(response.status, StatusCode::OK, "{uri}");

        let disposition = response.headers.get(header::CONTENT_DISPOSITION).unwrap();
        assert_eq!(
            disposition.to_str().unwrap(),
            format!("attachment; filename=\"{download_name}\"")
        );

        let created: Vec<_> = app
            .output_files()
            .into_iter()
            .filter(|p| !before.contains(p))
            .collect();
        assert_eq!(created.len(), 1, "{uri}");
        let name = created[0].file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with(file_prefix), "{name}");
        assert!(name.ends_with(".docx"));
    }

    let kinds: Vec<String> = app
        .db
        .documents
        .list(10, 0)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.kind.to_string())
        .collect();
    assert_eq!(kinds, ["declaracao_quitacao", "ciencia", "procuracao", "contrato"]);
}

#[tokio::test]
async fn test_acknowledgment_formats_both_amounts() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/gerar/ciencia", &acknowledgment_payload("Rosa Alves"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = read_part(&response.body, DOCUMENT_PART).unwrap();
    assert!(body.contains("Valor_Bruto: R$ 250.000,00"));
    assert!(body.contains("Valor_Liquido: R$ 199.999,99"));
    assert!(body.contains("Nome_Cessionario: L4 Ativos Ltda"));
}

#[tokio::test]
async fn test_missing_field_is_rejected_without_side_effects() {
    let app = TestApp::new().await;
    let mut payload = contract_payload("Maria da Silva");
    payload.as_object_mut().unwrap().remove("cedente_cpf");

    let response = app.post_json("/gerar/contrato", &payload).await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let body = response.json();
    assert!(body["error"].as_str().unwrap().contains("cedente_cpf"));
    assert_eq!(body["error"], body["detail"]);
    assert!(app.output_files().is_empty());
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_wrong_field_type_is_rejected() {
    let app = TestApp::new().await;
    let mut payload = power_of_attorney_payload("Paulo Souza");
    payload["outorgante_cpf"] = serde_json::json!(12345678900u64);

    let response = app.post_json("/gerar/procuracao", &payload).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut payload = contract_payload("Paulo Souza");
    payload["processo_valor_bruto"] = serde_json::json!("mil reais");
    let response = app.post_json("/gerar/contrato", &payload).await;
    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app.output_files().is_empty());
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_malformed_json_is_client_error() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::post("/gerar/declaracao")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"decl_nome\": "))
                .unwrap(),
        )
        .await;

    assert!(response.status.is_client_error());
    let body = response.json();
    assert!(!body["detail"].as_str().unwrap().is_empty());
    assert_eq!(body["error"], body["detail"]);
    assert!(app.output_files().is_empty());
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_missing_content_type_is_json_error() {
    let app = TestApp::new().await;

    let response = app
        .send(
            Request::post("/gerar/contrato")
                .body(Body::from(contract_payload("Maria da Silva").to_string()))
                .unwrap(),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert!(response.json()["detail"]
        .as_str()
        .unwrap()
        .contains("Content-Type"));
    assert!(app.output_files().is_empty());
    assert_eq!(app.record_count().await, 0);
}

/// Log store whose appends always fail.
struct FailingDocuments;

#[async_trait]
impl DocumentRepository for FailingDocuments {
    async fn append(&self, _record: NewDocumentRecord) -> l4docs_core::Result<i64> {
        Err(Error::Internal("document log unavailable".to_string()))
    }

    async fn get(&self, _id: i64) -> l4docs_core::Result<Option<DocumentRecord>> {
        Ok(None)
    }

    async fn list(&self, _limit: i64, _offset: i64) -> l4docs_core::Result<Vec<DocumentRecord>> {
        Ok(Vec::new())
    }

    async fn count(&self) -> l4docs_core::Result<i64> {
        Ok(0)
    }
}

#[tokio::test]
async fn test_append_failure_is_server_error_and_keeps_file() {
    let app = TestApp::with_documents(Arc::new(FailingDocuments)).await;

    let response = app
        .post_json("/gerar/contrato", &contract_payload("Maria da Silva"))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    let body = response.json();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("document log unavailable"));
    assert_eq!(body["error"], body["detail"]);

    // Render and append are not transactional: the rendered file stays
    let files = app.output_files();
    assert_eq!(files.len(), 1);
    let name = files[0].file_name().unwrap().to_str().unwrap();
    assert!(name.starts_with("contrato_"));
}

#[tokio::test]
async fn test_extra_fields_are_ignored() {
    let app = TestApp::new().await;
    let mut payload = declaration_payload("Jorge Lima");
    payload["observacao"] = serde_json::json!("campo extra");

    let response = app.post_json("/gerar/declaracao", &payload).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.record_count().await, 1);
}

#[tokio::test]
async fn test_stored_payload_matches_submitted() {
    let app = TestApp::new().await;
    let submitted = contract_payload("Maria da Silva");

    let response = app.post_json("/gerar/contrato", &submitted).await;
    assert_eq!(response.status, StatusCode::OK);

    let record = app.db.documents.list(1, 0).await.unwrap().remove(0);
    let stored: ContractPayload = serde_json::from_value(record.payload).unwrap();
    let expected: ContractPayload = parse_payload(&submitted).unwrap();
    assert_eq!(stored, expected);
    assert_eq!(stored.processo_valor_liquido, 1_000_000.0);
}

#[tokio::test]
async fn test_non_ascii_name_uses_encoded_filename() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/gerar/procuracao", &power_of_attorney_payload("João Conceição"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let disposition = response
        .headers
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.contains("filename*=utf-8''Procuracao_Jo%C3%A3o_Concei%C3%A7%C3%A3o.docx"));

    let body = read_part(&response.body, DOCUMENT_PART).unwrap();
    assert!(body.contains("Nome: João Conceição"));
}

#[tokio::test]
async fn test_values_are_xml_escaped() {
    let app = TestApp::new().await;

    let response = app
        .post_json("/gerar/declaracao", &declaration_payload("Ana & Bia <Ltda>"))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let body = read_part(&response.body, DOCUMENT_PART).unwrap();
    assert!(body.contains("Nome: Ana &amp; Bia &lt;Ltda&gt;"));
}

#[tokio::test]
async fn test_missing_template_is_server_error_without_record() {
    let app = TestApp::without_templates().await;

    let response = app
        .post_json("/gerar/contrato", &contract_payload("Maria da Silva"))
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json()["error"]
        .as_str()
        .unwrap()
        .contains("template-cessao-rpv.docx"));
    assert!(app.output_files().is_empty());
    assert_eq!(app.record_count().await, 0);
}

#[tokio::test]
async fn test_repeated_requests_create_distinct_files() {
    let app = TestApp::new().await;

    for _ in 0..5 {
        let response = app
            .post_json("/gerar/ciencia", &acknowledgment_payload("Rosa Alves"))
            .await;
        assert_eq!(response.status, StatusCode::OK);
    }

    assert_eq!(app.output_files().len(), 5);
    assert_eq!(app.record_count().await, 5);
}
