//! Server configuration
//!
//! Layered loading: compiled defaults, then optional `config/default.toml`
//! and `config/local.toml`, then `OUTREACH_*` environment overrides (double
//! underscore as section separator, e.g. `OUTREACH_SERVER__PORT=8080`).
//! A `.env` file is honored via dotenvy.

use serde::Deserialize;
use std::net::{SocketAddr, ToSocketAddrs};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; empty means no CORS headers are emitted.
    pub cors_origins: Vec<String>,
    /// Request body cap in bytes.
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When false, requests are accepted without a token and the principal
    /// is taken from the `x-user-id` header (local development only).
    pub enabled: bool,
    pub issuer_url: Option<String>,
    pub audience: Option<String>,
    pub jwks_cache_ttl_seconds: u64,
    pub http_timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
    pub json: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
            max_request_body_size: 2 * 1024 * 1024,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 10,
            connect_timeout_seconds: 10,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            issuer_url: None,
            audience: None,
            jwks_cache_ttl_seconds: 300,
            http_timeout_seconds: 10,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,sqlx=warn".to_string(),
            json: false,
        }
    }
}

impl Config {
    /// Load configuration from files and environment.
    pub fn load() -> anyhow::Result<Self> {
        // Missing .env is fine; a malformed one is not.
        match dotenvy::dotenv() {
            Ok(_) => {}
            Err(e) if e.not_found() => {}
            Err(e) => return Err(anyhow::anyhow!("Failed to read .env: {e}")),
        }

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("OUTREACH")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Reject configurations that cannot possibly work.
    pub fn validate(&self) -> Result<(), String> {
        if self.server.port == 0 {
            return Err("server.port must be non-zero".to_string());
        }
        if self.database.url.is_empty() {
            return Err("database.url is required".to_string());
        }
        if self.auth.enabled {
            if self.auth.issuer_url.is_none() {
                return Err("auth.issuer_url is required when auth is enabled".to_string());
            }
            if self.auth.audience.is_none() {
                return Err("auth.audience is required when auth is enabled".to_string());
            }
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.to_socket_addrs()?
            .next()
            .ok_or_else(|| anyhow::anyhow!("Could not resolve listen address {addr}"))
    }
}
