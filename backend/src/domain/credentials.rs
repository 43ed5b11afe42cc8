//! Credential store service: registration, login verification, and profile
//! lookup over a [`UserRepository`].
//!
//! Argon2 work runs on the blocking pool so a burst of logins cannot starve
//! the async executor.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tokio::task;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::password::{self, PasswordDigest, PasswordHashError};
use crate::domain::ports::{CredentialStore, UserPersistenceError, UserRepository};
use crate::domain::{Error, LoginCredentials, Registration, User, UserId};

fn map_repository_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { .. } => email_taken(),
    }
}

fn email_taken() -> Error {
    Error::conflict("Email already registered!")
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(format!("password hashing failed: {error}"))
}

fn map_join_error(error: task::JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {error}"))
}

/// [`CredentialStore`] implementation backed by a user repository.
#[derive(Clone)]
pub struct CredentialService<R> {
    users: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CredentialService<R> {
    pub fn new(users: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }
}

#[async_trait]
impl<R> CredentialStore for CredentialService<R>
where
    R: UserRepository,
{
    async fn register(&self, registration: &Registration) -> Result<User, Error> {
        let existing = self
            .users
            .find_by_email(registration.email())
            .await
            .map_err(map_repository_error)?;
        if existing.is_some() {
            return Err(email_taken());
        }

        registration
            .check_password_policy()
            .map_err(|err| Error::invalid_request(err.to_string()))?;

        let raw = Zeroizing::new(registration.password().to_owned());
        let digest = task::spawn_blocking(move || password::hash_password(&raw))
            .await
            .map_err(map_join_error)?
            .map_err(map_hash_error)?;

        let user = User::new(
            UserId::random(),
            registration.name().clone(),
            registration.email().clone(),
            self.clock.utc(),
        );
        // The repository's unique index settles races between the lookup
        // above and this insert.
        self.users
            .insert(&user, &digest)
            .await
            .map_err(map_repository_error)?;

        info!(user_id = %user.id(), "user registered");
        Ok(user)
    }

    async fn verify(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let stored = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?;
        let raw = Zeroizing::new(credentials.password().to_owned());

        let Some(stored) = stored else {
            task::spawn_blocking(move || password::verify_against_dummy(&raw))
                .await
                .map_err(map_join_error)?;
            debug!("login rejected: unknown email");
            return Err(Error::not_found("Email is not registered!"));
        };

        let digest: PasswordDigest = stored.digest;
        let matches = task::spawn_blocking(move || password::verify_password(&raw, &digest))
            .await
            .map_err(map_join_error)?
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %stored.user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized("Incorrect password!"));
        }

        Ok(stored.user)
    }

    async fn find(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::not_found("Cannot find the user!"))
    }
}

#[cfg(test)]
#[path = "credentials_tests.rs"]
mod tests;
