//! Test fixtures for database integration tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use l4docs_db::test_fixtures::TestDatabase;
//!
//! #[tokio::test]
//! async fn test_something() {
//!     let test_db = TestDatabase::new().await;
//!     let id = test_db.db.documents.append(sample_record("Ana")).await.unwrap();
//! }
//! ```

use serde_json::json;

use crate::{Database, DocumentKind, NewDocumentRecord, PoolConfig};

/// In-memory database URL used by tests.
pub const IN_MEMORY_DATABASE_URL: &str = "sqlite::memory:";

/// A migrated in-memory database, discarded when dropped.
pub struct TestDatabase {
    pub db: Database,
}

impl TestDatabase {
    /// Connect to a fresh in-memory database and apply migrations.
    #[cfg(feature = "migrations")]
    pub async fn new() -> Self {
        let db = Database::connect_with_config(IN_MEMORY_DATABASE_URL, PoolConfig::in_memory())
            .await
            .expect("Failed to open in-memory database");
        db.migrate().await.expect("Failed to apply migrations");
        Self { db }
    }
}

/// A contract record for `principal_name`, with a payload carrying that name.
pub fn sample_record(principal_name: &str) -> NewDocumentRecord {
    NewDocumentRecord {
        kind: DocumentKind::Contract,
        principal_name: principal_name.to_string(),
        payload: json!({
            "cedente_nome": principal_name,
            "processo_valor_bruto": 1234.5,
        }),
        output_path: format!("output/contrato_{:08x}.docx", principal_name.len()),
    }
}
