//! Driving port for the authenticated application use cases.

use async_trait::async_trait;

use crate::domain::{Application, Error, JobId, UserId};

/// Outcome of listing a caller's applications.
///
/// An empty result is a distinct outcome rather than an empty vector so the
/// HTTP adapter can answer it with its own status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplicationListing {
    Empty,
    Found(Vec<Application>),
}

impl From<Vec<Application>> for ApplicationListing {
    fn from(applications: Vec<Application>) -> Self {
        if applications.is_empty() {
            Self::Empty
        } else {
            Self::Found(applications)
        }
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationWorkflow: Send + Sync {
    /// Apply to `job_id` on behalf of the verified caller.
    async fn apply(&self, user_id: &UserId, job_id: &JobId) -> Result<Application, Error>;

    /// The verified caller's own applications.
    async fn list_mine(&self, user_id: &UserId) -> Result<ApplicationListing, Error>;
}
