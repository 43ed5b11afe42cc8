//! Driven port for account persistence.
use async_trait::async_trait;

use crate::domain::{EmailAddress, PasswordDigest, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already owns the email.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// A user together with its password digest.
///
/// Only the credential store sees this; everything else works with [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCredentials {
    pub user: User,
    pub digest: PasswordDigest,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account. Fails with `DuplicateEmail` when the email is
    /// already taken, even under concurrent inserts.
    async fn insert(
        &self,
        user: &User,
        digest: &PasswordDigest,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch an account and its digest by exact email.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError>;

    /// Fetch an account by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}
