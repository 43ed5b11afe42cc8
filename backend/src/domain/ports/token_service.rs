//! Port for minting and checking bearer tokens.
//!
//! Token verification is synchronous and CPU-light, so unlike the
//! repositories this port is not async.

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Failures raised while issuing or verifying tokens.
    pub enum TokenError {
        /// Signature, algorithm, structure, or subject is wrong.
        Invalid { message: String } => "token is invalid: {message}",
        /// The token was valid but its expiry has passed.
        Expired => "token has expired",
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Mint a token naming `user_id` as its subject.
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError>;

    /// Resolve a token back to its subject.
    fn verify(&self, token: &str) -> Result<UserId, TokenError>;
}
