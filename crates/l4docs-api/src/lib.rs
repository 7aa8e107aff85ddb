//! # l4docs-api
//!
//! HTTP surface of the l4docs document generator.
//!
//! Each `POST /gerar/<kind>` request validates a typed payload, renders the
//! kind's Word template, appends a record to the document log, and streams
//! the generated `.docx` back. `GET /documentos` exposes the log.

pub mod config;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use router::{build_router, cors_layer};
pub use state::AppState;
