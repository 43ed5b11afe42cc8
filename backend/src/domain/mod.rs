//! Domain primitives, services, and ports.
//!
//! Purpose: model accounts, job postings, and applications independently of
//! HTTP and storage. Inbound adapters talk to the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Job, Application and their identifiers.
//! - Registration / LoginCredentials: validated credential inputs.
//! - CredentialService, CatalogService, ApplicationWorkflowService: port
//!   implementations wired by the server.

pub mod application;
pub mod application_service;
pub mod auth;
pub mod catalog;
pub mod credentials;
pub mod error;
pub mod job;
pub mod password;
pub mod ports;
pub mod trace_id;
pub mod user;

pub use self::application::{
    Application, ApplicationId, ApplicationStatus, UnknownApplicationStatus,
};
pub use self::application_service::ApplicationWorkflowService;
pub use self::auth::{
    CredentialValidationError, LoginCredentials, PASSWORD_MAX_CHARS, PASSWORD_MIN_CHARS,
    Registration,
};
pub use self::catalog::CatalogService;
pub use self::credentials::CredentialService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::job::{Job, JobDraft, JobId, JobValidationError};
pub use self::password::{PasswordDigest, PasswordHashError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, User, UserId, UserName, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use jobboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Session expired!"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
