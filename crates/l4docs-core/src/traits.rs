//! Core traits for l4docs abstractions.
//!
//! The handlers depend on these traits rather than on a concrete database,
//! so the log store can be swapped for an in-memory backing in tests.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{DocumentRecord, NewDocumentRecord};

/// Default page size of the document listing.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Append-only log of generated documents.
#[async_trait]
pub trait DocumentRepository: Send + Sync {
    /// Insert a record and return its id. Committed when this returns.
    async fn append(&self, record: NewDocumentRecord) -> Result<i64>;

    /// Fetch one record by id.
    async fn get(&self, id: i64) -> Result<Option<DocumentRecord>>;

    /// Records ordered newest first (ties broken by id, newest first).
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<DocumentRecord>>;

    /// Total number of records.
    async fn count(&self) -> Result<i64>;
}
