//! Driven port for application persistence.
use async_trait::async_trait;

use crate::domain::{Application, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by application repository adapters.
    pub enum ApplicationPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "application repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "application repository query failed: {message}",
        /// The referenced user does not exist.
        UserNotFound { user_id: String } => "user {user_id} does not exist",
        /// The referenced job does not exist.
        JobNotFound { job_id: String } => "job {job_id} does not exist",
        /// The user has already applied to the job.
        Duplicate { user_id: String, job_id: String } =>
            "user {user_id} already applied to job {job_id}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicationRepository: Send + Sync {
    /// Persist a new application.
    ///
    /// The existence checks for both referenced rows and the insert form one
    /// atomic unit: concurrent submissions for the same pair produce exactly
    /// one stored row and `Duplicate` for the rest.
    async fn create(&self, application: &Application) -> Result<(), ApplicationPersistenceError>;

    /// Applications owned by `user_id`, oldest first.
    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Application>, ApplicationPersistenceError>;
}
