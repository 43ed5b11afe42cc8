//! Startup configuration.
//!
//! [`AppSettings`] is loaded once by `main` through OrthoConfig (CLI flags,
//! `JOBBOARD_*` environment variables, and config files). It is then turned
//! into a [`ServerConfig`] holding only ready-to-use values.

use std::net::SocketAddr;
use std::path::PathBuf;

use jobboard::outbound::persistence::DbPool;
use jobboard::outbound::token::{DEFAULT_TOKEN_TTL_SECS, MAX_TOKEN_TTL_SECS, TokenSettings};
use ortho_config::OrthoConfig;
use serde::Deserialize;

use super::cors::CorsPolicy;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Raw settings as supplied by the operator.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "JOBBOARD")]
pub struct AppSettings {
    /// Socket address the HTTP server listens on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection string. Without it the in-memory store is used.
    pub database_url: Option<String>,
    /// File holding the token signing secret.
    pub token_secret_file: Option<PathBuf>,
    /// Token lifetime in seconds.
    pub token_ttl_secs: Option<u64>,
    /// Let debug builds fall back to a random secret when none is configured.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
    /// Comma-separated browser origins allowed by CORS. Unset or `*` allows
    /// any origin.
    pub cors_allowed_origins: Option<String>,
}

impl AppSettings {
    pub fn bind_addr(&self) -> std::io::Result<SocketAddr> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid bind address {raw:?}: {err}"),
            )
        })
    }

    /// Token lifetime, checked against `1..=MAX_TOKEN_TTL_SECS`.
    pub fn token_ttl_secs(&self) -> std::io::Result<u64> {
        let ttl = self.token_ttl_secs.unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if ttl == 0 || ttl > MAX_TOKEN_TTL_SECS {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("token_ttl_secs must be between 1 and {MAX_TOKEN_TTL_SECS}, got {ttl}"),
            ));
        }
        Ok(ttl)
    }

    pub fn cors_policy(&self) -> std::io::Result<CorsPolicy> {
        self.cors_allowed_origins
            .as_deref()
            .map_or(Ok(CorsPolicy::AnyOrigin), CorsPolicy::parse)
    }
}

/// Resolved configuration consumed by [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) tokens: TokenSettings,
    pub(crate) db_pool: Option<DbPool>,
    pub(crate) cors: CorsPolicy,
}

impl ServerConfig {
    #[must_use]
    pub fn new(bind_addr: SocketAddr, tokens: TokenSettings) -> Self {
        Self {
            bind_addr,
            tokens,
            db_pool: None,
            cors: CorsPolicy::AnyOrigin,
        }
    }

    /// Restrict browser callers to the given policy.
    #[must_use]
    pub fn with_cors(mut self, cors: CorsPolicy) -> Self {
        self.cors = cors;
        self
    }

    /// Use PostgreSQL repositories instead of the in-memory store.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}
