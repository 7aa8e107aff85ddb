use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use l4docs_api::{build_router, cors_layer, AppState, ServerConfig};
use l4docs_db::{is_in_memory_url, log_pool_metrics, Database, DocumentRepository, PoolConfig};
use l4docs_render::{DocxRenderer, OutputDirectory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with configurable output
    //
    // Environment variables:
    //   LOG_FORMAT  - "json" or "text" (default: "text")
    //   LOG_FILE    - path to log file (optional, enables file logging)
    //   LOG_ANSI    - "true"/"false" override ANSI colors (auto-detected by default)
    //   RUST_LOG    - standard env filter (default: "l4docs_api=debug,tower_http=debug")
    let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let log_file = std::env::var("LOG_FILE").ok();
    let log_ansi = std::env::var("LOG_ANSI")
        .ok()
        .map(|v| v == "true" || v == "1");

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "l4docs_api=debug,l4docs_render=debug,tower_http=debug".into());

    let registry = tracing_subscriber::registry().with(env_filter);

    // Optionally create a file appender with daily rotation
    let _file_guard = if let Some(ref path) = log_file {
        let file_dir = std::path::Path::new(path)
            .parent()
            .unwrap_or(std::path::Path::new("."));
        let file_name = std::path::Path::new(path)
            .file_name()
            .and_then(|f| f.to_str())
            .unwrap_or("l4docs-api.log");
        let file_appender = tracing_appender::rolling::daily(file_dir, file_name);
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

        if log_format == "json" {
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking),
                )
                .init();
        } else {
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(log_ansi.unwrap_or(false));
            registry.with(layer).init();
        }
        Some(guard)
    } else {
        if log_format == "json" {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        } else {
            let mut layer = tracing_subscriber::fmt::layer();
            if let Some(ansi) = log_ansi {
                layer = layer.with_ansi(ansi);
            }
            registry.with(layer).init();
        }
        None
    };

    info!(
        log_format = %log_format,
        log_file = log_file.as_deref().unwrap_or("(stdout)"),
        "Logging initialized"
    );

    let config = ServerConfig::from_env();
    info!(
        subsystem = "api",
        templates_dir = %config.templates_dir.display(),
        output_dir = %config.output_dir.display(),
        list_max_limit = config.list_max_limit,
        any_origin = config.allowed_origins.is_empty(),
        "Configuration loaded"
    );

    // Database
    let pool_config = if is_in_memory_url(&config.database_url) {
        PoolConfig::in_memory()
    } else {
        PoolConfig::new().max_connections(config.db_max_connections)
    };
    let db = Database::connect_with_config(&config.database_url, pool_config).await?;
    db.migrate().await?;
    let existing = db.documents.count().await?;
    info!(subsystem = "api", document_count = existing, "Document log ready");
    log_pool_metrics(db.pool());

    // Templates and output
    let output = OutputDirectory::new(config.output_dir.clone());
    output.ensure_exists().await?;
    let renderer = DocxRenderer::new(config.templates_dir.clone(), output);
    let missing = renderer.missing_templates().await;
    if !missing.is_empty() {
        warn!(
            subsystem = "api",
            missing = missing.len(),
            "Some templates are missing; their endpoints will fail until the files are added"
        );
    }

    let state = AppState::new(
        Arc::new(db.documents.clone()),
        renderer,
        config.list_max_limit,
    );
    let app = build_router(state, cors_layer(&config.allowed_origins));

    // Start server
    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
