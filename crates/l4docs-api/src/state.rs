//! Shared handler state.

use std::sync::Arc;

use l4docs_core::DocumentRepository;
use l4docs_render::DocxRenderer;

/// State cloned into every handler.
#[derive(Clone)]
pub struct AppState {
    /// Document log; the SQLite repository in production.
    pub documents: Arc<dyn DocumentRepository>,
    pub renderer: Arc<DocxRenderer>,
    /// Upper bound applied to the listing `limit` parameter.
    pub list_max_limit: i64,
}

impl AppState {
    pub fn new(
        documents: Arc<dyn DocumentRepository>,
        renderer: DocxRenderer,
        list_max_limit: i64,
    ) -> Self {
        Self {
            documents,
            renderer: Arc::new(renderer),
            list_max_limit,
        }
    }
}
