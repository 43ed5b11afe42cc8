//! Job board server entry point.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use jobboard::inbound::http::health::HealthState;
use jobboard::outbound::persistence::{DbPool, PoolConfig, migrate};
use jobboard::outbound::token::{BuildMode, TokenSettings, load_token_secret};

use server::{AppSettings, ServerConfig, create_server};

fn io_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn connect_database(database_url: &str) -> std::io::Result<DbPool> {
    let applied = migrate(database_url.to_owned())
        .await
        .map_err(|err| io_error("database migration failed", err))?;
    info!(applied, "database schema is up to date");
    DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(|err| io_error("failed to create database pool", err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| io_error("failed to load settings", err))?;

    let secret = load_token_secret(
        settings.token_secret_file.as_deref(),
        settings.allow_ephemeral_secret,
        BuildMode::from_debug_assertions(),
    )
    .map_err(|err| io_error("failed to load token secret", err))?;
    info!(fingerprint = %secret.fingerprint(), "token secret loaded");

    let tokens = TokenSettings::new(secret, settings.token_ttl_secs()?);
    let mut config =
        ServerConfig::new(settings.bind_addr()?, tokens).with_cors(settings.cors_policy()?);
    if let Some(url) = settings.database_url.as_deref() {
        config = config.with_db_pool(connect_database(url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
