//! Driving port for jobs and the applications that reference them.

use async_trait::async_trait;

use crate::domain::{Application, Error, Job, JobDraft, JobId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RelationalCatalog: Send + Sync {
    async fn create_job(&self, draft: JobDraft) -> Result<Job, Error>;

    async fn get_job(&self, id: &JobId) -> Result<Job, Error>;

    /// Every posting, oldest first. Empty when nothing is published.
    async fn list_jobs(&self) -> Result<Vec<Job>, Error>;

    async fn update_job(&self, id: &JobId, draft: JobDraft) -> Result<Job, Error>;

    /// Remove a posting together with its applications.
    async fn delete_job(&self, id: &JobId) -> Result<(), Error>;

    /// `NotFound` if either key is dangling, `Conflict` if the pair exists.
    async fn create_application(&self, user_id: &UserId, job_id: &JobId)
        -> Result<Application, Error>;

    async fn list_applications_for_user(&self, user_id: &UserId)
        -> Result<Vec<Application>, Error>;
}
