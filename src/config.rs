//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server
//! starts. A `.env` file is honoured when the binaries call `dotenvy::dotenv()`.
//!
//! ## Public URL
//!
//! Short URLs are built as `PUBLIC_URL/<fragment>`. When `PUBLIC_URL` is not
//! set it is derived from the bind settings:
//!
//! ```bash
//! export SCHEMA="https"
//! export HOST="go.example.com"
//! export PORT="443"
//! # PUBLIC_URL defaults to https://go.example.com:443
//! ```
//!
//! ## Redis
//!
//! Either a full URL or individual components:
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! # or
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `HOST:PORT`)
//! - `STORE_BACKEND` - `redis` or `memory` (default: `redis`)
//! - `CORS_ALLOWED_ORIGINS` - Comma-separated origins, `*` for any (default: any)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Where redirects are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Redis,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "redis" => Ok(Self::Redis),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("STORE_BACKEND must be 'redis' or 'memory', got '{}'", other),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => f.write_str("redis"),
            Self::Memory => f.write_str("memory"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Base URI prepended to fragments, without a trailing slash.
    pub public_url: String,
    pub store_backend: StoreBackend,
    pub redis_url: String,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
    pub log_level: String,
    pub log_format: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `STORE_BACKEND` holds an unknown value.
    pub fn from_env() -> Result<Self> {
        let schema = env::var("SCHEMA").unwrap_or_else(|_| "http".to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| format!("{}:{}", host, port));
        let public_url = env::var("PUBLIC_URL")
            .unwrap_or_else(|_| format!("{}://{}:{}", schema, host, port))
            .trim_end_matches('/')
            .to_string();

        let store_backend = env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "redis".to_string())
            .parse::<StoreBackend>()
            .context("Failed to load store configuration")?;

        let redis_url = Self::load_redis_url();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|v| parse_origins(&v))
            .unwrap_or_default();

        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            listen_addr,
            public_url,
            store_backend,
            redis_url,
            cors_allowed_origins,
            log_level,
            log_format,
        })
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`,
    ///    each with a local default
    fn load_redis_url() -> String {
        if let Ok(url) = env::var("REDIS_URL") {
            return url;
        }

        let host = env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string());
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        match env::var("REDIS_PASSWORD") {
            // Empty password means no authentication
            Ok(pwd) if !pwd.is_empty() => format!("redis://:{}@{}:{}/{}", pwd, host, port, db),
            _ => format!("redis://{}:{}/{}", host, port, db),
        }
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is not `host:port`
    /// - `public_url` is not an absolute http(s) URL
    /// - `redis_url` has the wrong scheme (Redis backend only)
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let public_url = Url::parse(&self.public_url)
            .with_context(|| format!("PUBLIC_URL is not a valid URL: '{}'", self.public_url))?;
        if public_url.scheme() != "http" && public_url.scheme() != "https" {
            anyhow::bail!(
                "PUBLIC_URL must use http or https, got '{}'",
                public_url.scheme()
            );
        }

        if self.store_backend == StoreBackend::Redis
            && !self.redis_url.starts_with("redis://")
            && !self.redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(&self.redis_url)
            );
        }

        Ok(())
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Public URL: {}", self.public_url);

        match self.store_backend {
            StoreBackend::Redis => tracing::info!(
                "  Store: redis ({})",
                mask_connection_string(&self.redis_url)
            ),
            StoreBackend::Memory => tracing::info!("  Store: memory (not persistent)"),
        }

        if self.cors_allowed_origins.is_empty() {
            tracing::info!("  CORS origins: any");
        } else {
            tracing::info!("  CORS origins: {}", self.cors_allowed_origins.join(", "));
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated origin list. `*` anywhere means any origin.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(|o| o.trim_end_matches('/').to_string())
        .collect();

    if origins.iter().any(|o| o == "*") {
        Vec::new()
    } else {
        origins
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// `redis://:password@host:port/db` becomes `redis://:***@host:port/db`.
pub fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// Expects environment variables to be already loaded (e.g., via
/// `dotenvy::dotenv()` in the binary).
///
/// # Errors
///
/// Returns an error if a variable holds an invalid value.
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
