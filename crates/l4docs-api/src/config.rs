//! Server configuration from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `DATABASE_URL` | `sqlite://./l4docs.db` |
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8000` |
//! | `TEMPLATES_DIR` | `templates` |
//! | `OUTPUT_DIR` | `output` |
//! | `LIST_MAX_LIMIT` | `500` |
//! | `ALLOWED_ORIGINS` | `*` |
//! | `DB_MAX_CONNECTIONS` | `5` |

use std::path::PathBuf;
use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://./l4docs.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_LIST_MAX_LIMIT: i64 = 500;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub templates_dir: PathBuf,
    pub output_dir: PathBuf,
    pub list_max_limit: i64,
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub db_max_connections: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            templates_dir: PathBuf::from(DEFAULT_TEMPLATES_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            list_max_limit: DEFAULT_LIST_MAX_LIMIT,
            allowed_origins: Vec::new(),
            db_max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl ServerConfig {
    /// Read the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unset or blank variables take
    /// their default; unparseable numbers are logged and take their default.
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        Self {
            database_url: get("DATABASE_URL").unwrap_or(defaults.database_url),
            host: get("HOST").unwrap_or(defaults.host),
            port: parse_or("PORT", get("PORT"), defaults.port),
            templates_dir: get("TEMPLATES_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.templates_dir),
            output_dir: get("OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.output_dir),
            list_max_limit: parse_or("LIST_MAX_LIMIT", get("LIST_MAX_LIMIT"), defaults.list_max_limit)
                .max(1),
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            db_max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                get("DB_MAX_CONNECTIONS"),
                defaults.db_max_connections,
            )
            .max(1),
        }
    }

    /// `host:port` to bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr + Copy>(name: &str, raw: Option<String>, default: T) -> T {
    match raw {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(variable = name, value = %raw, "Invalid numeric setting, using default");
            default
        }),
    }
}

/// Split a comma-separated origin list. `*` anywhere means any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}
