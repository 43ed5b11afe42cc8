//! Chooses the repository adapters behind the HTTP state.

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::warn;

use jobboard::inbound::http::state::HttpState;
use jobboard::outbound::memory::InMemoryStore;
use jobboard::outbound::persistence::{
    DieselApplicationRepository, DieselJobRepository, DieselUserRepository,
};
use jobboard::outbound::token::JwtTokenService;

use super::ServerConfig;

/// Build handler state over PostgreSQL when a pool is configured, otherwise
/// over a process-local store.
pub(crate) fn build_http_state(config: &ServerConfig) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(JwtTokenService::new(&config.tokens, Arc::clone(&clock)));

    match &config.db_pool {
        Some(pool) => HttpState::from_repositories(
            Arc::new(DieselUserRepository::new(pool.clone())),
            Arc::new(DieselJobRepository::new(pool.clone())),
            Arc::new(DieselApplicationRepository::new(pool.clone())),
            tokens,
            clock,
        ),
        None => {
            warn!("no database configured; data lives in memory and is lost on restart");
            let store = Arc::new(InMemoryStore::new());
            HttpState::from_repositories(
                Arc::clone(&store),
                Arc::clone(&store),
                store,
                tokens,
                clock,
            )
        }
    }
}
