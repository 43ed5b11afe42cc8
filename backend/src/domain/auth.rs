//! Account credential inputs: registration and login payloads.
//!
//! Handlers build these from raw strings before calling a port, so the
//! credential store only ever sees validated values. Raw passwords are held
//! in [`Zeroizing`] buffers and wiped on drop.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, UserName, UserValidationError};

/// Minimum password length, counted in characters.
pub const PASSWORD_MIN_CHARS: usize = 8;
/// Maximum password length, counted in characters.
pub const PASSWORD_MAX_CHARS: usize = 15;

/// Validation failures for credential payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialValidationError {
    /// A required field was missing or blank.
    MissingFields,
    /// The email does not look like an address.
    InvalidEmail,
    /// The password length falls outside the accepted range.
    PasswordLength { min: usize, max: usize },
}

impl fmt::Display for CredentialValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFields => write!(f, "All fields are required!"),
            Self::InvalidEmail => write!(f, "Please provide a valid email address."),
            Self::PasswordLength { min, max } => write!(
                f,
                "Password must be minimum of {min} and maximum of {max} characters."
            ),
        }
    }
}

impl std::error::Error for CredentialValidationError {}

impl From<UserValidationError> for CredentialValidationError {
    fn from(value: UserValidationError) -> Self {
        match value {
            UserValidationError::InvalidEmail => Self::InvalidEmail,
            _ => Self::MissingFields,
        }
    }
}

/// Validated registration request.
///
/// Password length is not checked on construction. The credential store
/// reports a taken email ahead of a bad password and calls
/// [`Registration::check_password_policy`] once the email is known to be free.
///
/// # Examples
/// ```
/// use jobboard::domain::Registration;
///
/// let registration = Registration::try_from_parts("Jack", "jack@example.com", "password1")
///     .expect("valid registration");
/// assert!(registration.check_password_policy().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: UserName,
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl Registration {
    pub fn try_from_parts(
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<Self, CredentialValidationError> {
        if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(CredentialValidationError::MissingFields);
        }
        Ok(Self {
            name: UserName::new(name)?,
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Enforce the accepted password length range.
    pub fn check_password_policy(&self) -> Result<(), CredentialValidationError> {
        let length = self.password.chars().count();
        if (PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&length) {
            Ok(())
        } else {
            Err(CredentialValidationError::PasswordLength {
                min: PASSWORD_MIN_CHARS,
                max: PASSWORD_MAX_CHARS,
            })
        }
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is trimmed and well formed.
/// - `password` is non-empty and keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, CredentialValidationError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(CredentialValidationError::MissingFields);
        }
        Ok(Self {
            email: EmailAddress::new(email)?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}
