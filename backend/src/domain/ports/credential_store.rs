//! Driving port for account registration and login.
//!
//! Inbound adapters call this without knowing how users are stored, which
//! lets handler tests substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Create an account. `Conflict` when the email is taken, then
    /// `InvalidRequest` when the password breaks the length policy.
    async fn register(&self, registration: &Registration) -> Result<User, Error>;

    /// Check a login attempt. `NotFound` for an unknown email and
    /// `Unauthorized` for a wrong password.
    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Public profile lookup.
    async fn find(&self, id: &UserId) -> Result<User, Error>;
}
