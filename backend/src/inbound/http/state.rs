//! Shared HTTP adapter state.
//!
//! Handlers receive this through `web::Data` and only ever see driving ports,
//! so they stay testable against in-memory adapters.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    ApplicationRepository, ApplicationWorkflow, CredentialStore, JobRepository,
    RelationalCatalog, TokenService, UserRepository,
};
use crate::domain::{ApplicationWorkflowService, CatalogService, CredentialService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub credentials: Arc<dyn CredentialStore>,
    pub tokens: Arc<dyn TokenService>,
    pub catalog: Arc<dyn RelationalCatalog>,
    pub applications: Arc<dyn ApplicationWorkflow>,
}

impl HttpState {
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        tokens: Arc<dyn TokenService>,
        catalog: Arc<dyn RelationalCatalog>,
        applications: Arc<dyn ApplicationWorkflow>,
    ) -> Self {
        Self {
            credentials,
            tokens,
            catalog,
            applications,
        }
    }

    /// Wire the domain services on top of a set of repository adapters.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use jobboard::inbound::http::state::HttpState;
    /// use jobboard::outbound::memory::InMemoryStore;
    /// use jobboard::outbound::token::{JwtTokenService, TokenSecret, TokenSettings};
    /// use mockable::{Clock, DefaultClock};
    ///
    /// let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    /// let settings = TokenSettings::new(TokenSecret::from_bytes(vec![7; 32]), 3_600);
    /// let tokens = Arc::new(JwtTokenService::new(&settings, Arc::clone(&clock)));
    /// let store = Arc::new(InMemoryStore::new());
    /// let state = HttpState::from_repositories(
    ///     Arc::clone(&store),
    ///     Arc::clone(&store),
    ///     store,
    ///     tokens,
    ///     clock,
    /// );
    /// let _catalog = state.catalog.clone();
    /// ```
    pub fn from_repositories<U, J, A>(
        users: Arc<U>,
        jobs: Arc<J>,
        applications: Arc<A>,
        tokens: Arc<dyn TokenService>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        U: UserRepository + 'static,
        J: JobRepository + 'static,
        A: ApplicationRepository + 'static,
    {
        let credentials = Arc::new(CredentialService::new(users, Arc::clone(&clock)));
        let catalog: Arc<dyn RelationalCatalog> =
            Arc::new(CatalogService::new(jobs, applications, clock));
        let workflow = Arc::new(ApplicationWorkflowService::new(Arc::clone(&catalog)));
        Self::new(credentials, tokens, catalog, workflow)
    }
}
