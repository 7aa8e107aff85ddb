//! # l4docs-db
//!
//! SQLite database layer for l4docs.
//!
//! This crate provides:
//! - Connection pool management
//! - The append-only document log repository
//! - Embedded schema migrations
//!
//! ## Example
//!
//! ```rust,ignore
//! use l4docs_db::{Database, DocumentRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite://./l4docs.db").await?;
//!     db.migrate().await?;
//!
//!     for record in db.documents.list(50, 0).await? {
//!         println!("{} {} {}", record.id, record.kind, record.principal_name);
//!     }
//!     Ok(())
//! }
//! ```
pub mod documents;
pub mod pool;

// Test fixtures for integration tests
// Note: Always compiled so integration tests in other crates can build an in-memory store
pub mod test_fixtures;

// Re-export core types
pub use l4docs_core::*;

pub use documents::SqliteDocumentRepository;
pub use pool::{
    create_pool, create_pool_with_config, is_in_memory_url, log_pool_metrics, PoolConfig,
};

/// Combined database context with all repositories.
#[derive(Clone)]
pub struct Database {
    /// The underlying connection pool.
    pub pool: sqlx::SqlitePool,
    /// Append-only log of generated documents.
    pub documents: SqliteDocumentRepository,
}

impl Database {
    /// Create a new Database instance from a connection pool.
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self {
            documents: SqliteDocumentRepository::new(pool.clone()),
            pool,
        }
    }

    /// Create a new Database instance by connecting to the given URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = create_pool(url).await?;
        Ok(Self::new(pool))
    }

    /// Create with custom pool configuration.
    pub async fn connect_with_config(url: &str, config: PoolConfig) -> Result<Self> {
        let pool = create_pool_with_config(url, config).await?;
        Ok(Self::new(pool))
    }

    /// Run pending migrations.
    #[cfg(feature = "migrations")]
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("../../migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Database(sqlx::Error::Migrate(Box::new(e))))?;
        Ok(())
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}
