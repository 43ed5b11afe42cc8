//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`TokenService`]) describe what the domain
//! needs from infrastructure and report failures through enums generated by
//! `define_port_error!`. Driving ports ([`CredentialStore`],
//! [`RelationalCatalog`], [`ApplicationWorkflow`]) are what inbound adapters
//! call and speak [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod application_repository;
mod application_workflow;
mod credential_store;
mod job_repository;
mod relational_catalog;
mod token_service;
mod user_repository;

#[cfg(test)]
pub use application_repository::MockApplicationRepository;
pub use application_repository::{ApplicationPersistenceError, ApplicationRepository};
#[cfg(test)]
pub use application_workflow::MockApplicationWorkflow;
pub use application_workflow::{ApplicationListing, ApplicationWorkflow};
#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::CredentialStore;
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobPersistenceError, JobRepository};
#[cfg(test)]
pub use relational_catalog::MockRelationalCatalog;
pub use relational_catalog::RelationalCatalog;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{StoredCredentials, UserPersistenceError, UserRepository};
