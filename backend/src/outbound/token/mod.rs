//! HS256 JWT implementation of the [`TokenService`] port.
//!
//! Expiry is checked against an injected [`Clock`] rather than the system
//! time inside `jsonwebtoken`, so tests can move time forward without
//! sleeping.

mod secret;

pub use secret::{BuildMode, TOKEN_SECRET_MIN_LEN, TokenSecret, TokenSecretError, load_token_secret};

use std::sync::Arc;

use chrono::TimeDelta;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::{TokenError, TokenService};

/// Default token lifetime: one day.
pub const DEFAULT_TOKEN_TTL_SECS: u64 = 86_400;

/// Longest accepted token lifetime: 365 days.
pub const MAX_TOKEN_TTL_SECS: u64 = 31_536_000;

/// Signing secret and lifetime for issued tokens. Read-only after startup.
#[derive(Debug, Clone)]
pub struct TokenSettings {
    secret: TokenSecret,
    ttl: TimeDelta,
}

impl TokenSettings {
    /// Lifetimes above [`MAX_TOKEN_TTL_SECS`] are clamped so `issue` can
    /// always compute an expiry; startup rejects them before this point.
    pub fn new(secret: TokenSecret, ttl_secs: u64) -> Self {
        let ttl = i64::try_from(ttl_secs.min(MAX_TOKEN_TTL_SECS))
            .map_or(TimeDelta::zero(), TimeDelta::seconds);
        Self { secret, ttl }
    }

    pub fn secret(&self) -> &TokenSecret {
        &self.secret
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    iat: i64,
    exp: i64,
}

/// JWT-backed token service.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
}

impl JwtTokenService {
    pub fn new(settings: &TokenSettings, clock: Arc<dyn Clock>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            encoding: EncodingKey::from_secret(settings.secret().as_bytes()),
            decoding: DecodingKey::from_secret(settings.secret().as_bytes()),
            validation,
            ttl: settings.ttl(),
            clock,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let now = self.clock.utc();
        let expires_at = now
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::signing("token expiry overflows"))?;
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| TokenError::invalid(format!("{:?}", err.kind())))?;
        let user_id = UserId::new(&data.claims.sub)
            .map_err(|err| TokenError::invalid(format!("subject: {err}")))?;
        if self.clock.utc().timestamp() > data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(user_id)
    }
}
