//! Argon2id password hashing.
//!
//! Digests are stored as PHC strings, so the salt and cost parameters travel
//! with the hash. These functions are CPU bound; async callers should run
//! them on the blocking pool.

use std::fmt;
use std::sync::OnceLock;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Failures raised while hashing or parsing a digest.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordHashError {
    #[error("failed to hash password: {message}")]
    Hash { message: String },
    #[error("stored password hash is malformed: {message}")]
    Malformed { message: String },
}

/// Salted Argon2id digest in PHC string format.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    /// Wrap a PHC string loaded from storage.
    pub fn from_phc(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}

/// Hash `password` with a fresh random salt.
pub fn hash_password(password: &str) -> Result<PasswordDigest, PasswordHashError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|err| PasswordHashError::Hash {
            message: err.to_string(),
        })?;
    Ok(PasswordDigest(hash.to_string()))
}

/// Check `password` against a stored digest.
///
/// Returns `Ok(false)` on mismatch and `Err` only when the digest itself
/// cannot be parsed.
pub fn verify_password(password: &str, digest: &PasswordDigest) -> Result<bool, PasswordHashError> {
    let parsed = PasswordHash::new(digest.as_str()).map_err(|err| PasswordHashError::Malformed {
        message: err.to_string(),
    })?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

static DUMMY_DIGEST: OnceLock<Option<PasswordDigest>> = OnceLock::new();

/// Spend one verification against a throwaway digest.
///
/// Used when the account does not exist so that an unknown email costs the
/// same as a wrong password.
pub fn verify_against_dummy(password: &str) {
    let dummy = DUMMY_DIGEST.get_or_init(|| hash_password("dummy-password-for-timing").ok());
    if let Some(digest) = dummy {
        let _ = verify_password(password, digest);
    }
}
