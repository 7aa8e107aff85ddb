//! Document log repository implementation.

use std::time::Instant;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use l4docs_core::{
    DocumentKind, DocumentRecord, DocumentRepository, Error, NewDocumentRecord, Result,
};

/// SQLite implementation of DocumentRepository.
#[derive(Clone)]
pub struct SqliteDocumentRepository {
    pool: SqlitePool,
}

impl SqliteDocumentRepository {
    /// Create a new SqliteDocumentRepository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn row_to_record(row: &SqliteRow) -> Result<DocumentRecord> {
    let kind: String = row.try_get("kind")?;
    let payload_json: String = row.try_get("payload_json")?;
    Ok(DocumentRecord {
        id: row.try_get("id")?,
        kind: kind
            .parse::<DocumentKind>()
            .map_err(|_| Error::Internal(format!("stored document has unknown kind '{}'", kind)))?,
        principal_name: row.try_get("principal_name")?,
        payload: serde_json::from_str(&payload_json)?,
        output_path: row.try_get("output_path")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

#[async_trait]
impl DocumentRepository for SqliteDocumentRepository {
    async fn append(&self, record: NewDocumentRecord) -> Result<i64> {
        let start = Instant::now();
        let payload_json = serde_json::to_string(&record.payload)?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            INSERT INTO document_record (kind, principal_name, payload_json, output_path, created_at)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.kind.as_str())
        .bind(&record.principal_name)
        .bind(&payload_json)
        .bind(&record.output_path)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(Error::Database)?;

        let id = result.last_insert_rowid();
        info!(
            subsystem = "database",
            component = "documents",
            op = "append",
            document_id = id,
            kind = %record.kind,
            output_path = %record.output_path,
            duration_ms = start.elapsed().as_millis() as u64,
            "Document record appended"
        );
        Ok(id)
    }

    async fn get(&self, id: i64) -> Result<Option<DocumentRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, kind, principal_name, payload_json, output_path, created_at
            FROM document_record
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Error::Database)?;

        row.as_ref().map(row_to_record).transpose()
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<DocumentRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, kind, principal_name, payload_json, output_path, created_at
            FROM document_record
            ORDER BY created_at DESC, id DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(Error::Database)?;

        debug!(
            subsystem = "database",
            component = "documents",
            op = "list",
            limit,
            offset,
            result_count = rows.len(),
            "Listed document records"
        );

        rows.iter().map(row_to_record).collect()
    }

    async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM document_record")
            .fetch_one(&self.pool)
            .await
            .map_err(Error::Database)?;
        Ok(row.try_get("total")?)
    }
}
