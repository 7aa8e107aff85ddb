//! Shared harness for API integration tests: in-memory log, temporary
//! template and output directories, and `oneshot` request helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use l4docs_api::{build_router, cors_layer, AppState};
use l4docs_db::test_fixtures::TestDatabase;
use l4docs_db::{Database, DocumentRepository};
use l4docs_render::test_fixtures::write_templates;
use l4docs_render::{DocxRenderer, OutputDirectory};

pub const TEST_LIST_MAX_LIMIT: i64 = 20;

pub struct TestApp {
    pub router: Router,
    pub db: Database,
    pub templates: TempDir,
    pub output: TempDir,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

impl TestApp {
    /// App with every kind's template in place.
    pub async fn new() -> Self {
        let app = Self::without_templates().await;
        write_templates(app.templates.path()).expect("write templates");
        app
    }

    /// App whose template directory is empty.
    pub async fn without_templates() -> Self {
        Self::build(None).await
    }

    /// App with templates whose handlers log to `documents` instead of the
    /// in-memory database.
    pub async fn with_documents(documents: Arc<dyn DocumentRepository>) -> Self {
        let app = Self::build(Some(documents)).await;
        write_templates(app.templates.path()).expect("write templates");
        app
    }

    async fn build(documents: Option<Arc<dyn DocumentRepository>>) -> Self {
        let test_db = TestDatabase::new().await;
        let templates = tempfile::tempdir().expect("templates dir");
        let output = tempfile::tempdir().expect("output dir");

        let documents: Arc<dyn DocumentRepository> = match documents {
            Some(documents) => documents,
            None => Arc::new(test_db.db.documents.clone()),
        };
        let renderer = DocxRenderer::new(templates.path(), OutputDirectory::new(output.path()));
        let state = AppState::new(documents, renderer, TEST_LIST_MAX_LIMIT);

        Self {
            router: build_router(state, cors_layer(&[])),
            db: test_db.db,
            templates,
            output,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    pub fn output_files(&self) -> Vec<std::path::PathBuf> {
        std::fs::read_dir(self.output.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .collect()
    }

    pub async fn record_count(&self) -> i64 {
        self.db.documents.count().await.unwrap()
    }
}

pub fn contract_payload(name: &str) -> Value {
    json!({
        "cedente_nome": name,
        "cedente_cpf": "123.456.789-00",
        "cedente_rg": "12.345.678-9",
        "cedente_nacionalidade": "brasileira",
        "cedente_profissao": "professora",
        "cedente_estado_civil": "casada",
        "cedente_endereco": "Rua das Flores, 100",
        "cedente_cep": "01001-000",
        "cedente_cidade": "São Paulo",
        "cedente_uf": "SP",
        "processo_numero": "0001234-56.2020.8.26.0053",
        "processo_devedor": "Estado de São Paulo",
        "processo_valor_bruto": 1234.5,
        "processo_valor_liquido": "1000000"
    })
}

pub fn power_of_attorney_payload(name: &str) -> Value {
    json!({
        "outorgante_nome": name,
        "outorgante_cpf": "987.654.321-00",
        "outorgante_rg": "98.765.432-1",
        "outorgante_nacionalidade": "brasileiro",
        "outorgante_profissao": "engenheiro",
        "outorgante_estado_civil": "solteiro",
        "outorgante_endereco": "Av. Paulista, 1000",
        "outorgante_cep": "01310-100",
        "outorgante_data_nasc": "01/02/1970",
        "proc_numero": "0009876-54.2019.8.26.0053",
        "proc_local": "São Paulo",
        "proc_data": "16/10/2026"
    })
}

pub fn acknowledgment_payload(name: &str) -> Value {
    json!({
        "cedente2_nome": name,
        "cedente2_cpf": "111.222.333-44",
        "cedente2_rg": "11.222.333-4",
        "cedente2_nacionalidade": "brasileira",
        "cedente2_profissao": "aposentada",
        "cedente2_estado_civil": "viúva",
        "cedente2_endereco": "Rua Augusta, 500",
        "cedente2_cep": "01305-000",
        "cedente2_data_nasc": "10/11/1950",
        "cessionario2_nome": "L4 Ativos Ltda",
        "cessionario2_cpf": "12.345.678/0001-90",
        "cessionario2_rg": "-",
        "cessionario2_profissao": "empresa",
        "cessionario2_endereco": "Rua Funchal, 200",
        "cessionario2_cep": "04551-060",
        "proc2_numero": "0005555-11.2018.8.26.0053",
        "proc2_valor_bruto": 250000,
        "proc2_valor_liquido": 199999.99,
        "proc2_advogado": "Dr. Carlos Pereira",
        "proc2_banco": "Banco do Brasil",
        "proc2_agencia": "1234-5",
        "proc2_conta": "67890-1",
        "proc2_data": "16/10/2026"
    })
}

pub fn declaration_payload(name: &str) -> Value {
    json!({
        "decl_nome": name,
        "decl_cpf": "555.666.777-88",
        "decl_rg": "55.666.777-8",
        "decl_nacionalidade": "brasileiro",
        "decl_profissao": "comerciante",
        "decl_estado_civil": "divorciado",
        "decl_endereco": "Rua Vergueiro, 300",
        "decl_cep": "01504-000",
        "decl_data_nasc": "05/06/1965",
        "decl_data_negociacao": "01/09/2026",
        "decl_processo": "0007777-22.2017.8.26.0053",
        "decl_estado_devedor": "SP",
        "decl_unidade": "1ª Vara da Fazenda Pública",
        "decl_comarca": "São Paulo",
        "decl_processo_origem": "0003333-00.2010.8.26.0053",
        "decl_local": "São Paulo",
        "decl_data": "16/10/2026"
    })
}
