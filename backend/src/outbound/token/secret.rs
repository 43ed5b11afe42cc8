//! Token signing secret loading and fingerprinting.
//!
//! Release builds insist on a secret file of at least
//! [`TOKEN_SECRET_MIN_LEN`] bytes. Debug builds may opt into a random,
//! process-lifetime secret so local runs need no setup.

use std::fmt;
use std::path::{Path, PathBuf};

use argon2::password_hash::rand_core::{OsRng, RngCore};
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::{Zeroize, Zeroizing};

/// Minimum secret length accepted by release builds.
pub const TOKEN_SECRET_MIN_LEN: usize = 32;
const EPHEMERAL_SECRET_LEN: usize = 64;
const FINGERPRINT_BYTES: usize = 8;

/// Build mode for secret validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Debug builds tolerate short secrets and allow ephemeral ones.
    Debug,
    /// Release builds require a real secret of adequate length.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Errors raised while loading the signing secret.
#[derive(thiserror::Error, Debug)]
pub enum TokenSecretError {
    #[error("no token secret file configured and ephemeral secrets are disabled")]
    Missing,
    #[error("failed to read token secret at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("token secret at {path} is empty")]
    Empty { path: PathBuf },
    #[error("token secret at {path} too short: need >= {min_len} bytes, got {length}")]
    TooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("ephemeral token secrets are not allowed in release builds")]
    EphemeralNotAllowed,
}

/// HMAC key material for signing tokens. Wiped on drop.
#[derive(Clone)]
pub struct TokenSecret(Zeroizing<Vec<u8>>);

impl TokenSecret {
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(Zeroizing::new(bytes.into()))
    }

    /// Generate a random secret that lives only as long as the process.
    pub fn ephemeral() -> Self {
        let mut bytes = vec![0_u8; EPHEMERAL_SECRET_LEN];
        OsRng.fill_bytes(&mut bytes);
        Self::from_bytes(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// First eight bytes of the SHA-256 digest, hex encoded.
    ///
    /// Safe to log; lets operators tell which secret is active.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for TokenSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
    }
}

/// Load the signing secret.
///
/// # Examples
///
/// ```rust
/// use jobboard::outbound::token::{load_token_secret, BuildMode};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = std::env::temp_dir().join("jobboard_token_secret_example");
/// std::fs::write(&path, vec![b'k'; 32])?;
///
/// let secret = load_token_secret(Some(&path), false, BuildMode::Release)?;
/// assert_eq!(secret.as_bytes().len(), 32);
///
/// std::fs::remove_file(&path)?;
/// # Ok(())
/// # }
/// ```
pub fn load_token_secret(
    path: Option<&Path>,
    allow_ephemeral: bool,
    mode: BuildMode,
) -> Result<TokenSecret, TokenSecretError> {
    if allow_ephemeral && mode == BuildMode::Release {
        return Err(TokenSecretError::EphemeralNotAllowed);
    }

    let Some(path) = path else {
        if allow_ephemeral {
            warn!("no token secret file configured; using temporary secret (dev only)");
            return Ok(TokenSecret::ephemeral());
        }
        return Err(TokenSecretError::Missing);
    };

    match std::fs::read(path) {
        Ok(bytes) => secret_from_file_bytes(path, bytes, mode),
        Err(error) if allow_ephemeral => {
            warn!(
                path = %path.display(),
                error = %error,
                "using temporary token secret (dev only)"
            );
            Ok(TokenSecret::ephemeral())
        }
        Err(error) => Err(TokenSecretError::Read {
            path: path.to_path_buf(),
            source: error,
        }),
    }
}

fn secret_from_file_bytes(
    path: &Path,
    mut bytes: Vec<u8>,
    mode: BuildMode,
) -> Result<TokenSecret, TokenSecretError> {
    // Files written by editors usually end in a newline.
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }

    let length = bytes.len();
    if length == 0 {
        return Err(TokenSecretError::Empty {
            path: path.to_path_buf(),
        });
    }
    if length < TOKEN_SECRET_MIN_LEN {
        if mode == BuildMode::Release {
            bytes.zeroize();
            return Err(TokenSecretError::TooShort {
                path: path.to_path_buf(),
                length,
                min_len: TOKEN_SECRET_MIN_LEN,
            });
        }
        warn!(
            path = %path.display(),
            length,
            "token secret shorter than release minimum"
        );
    }
    Ok(TokenSecret::from_bytes(bytes))
}
