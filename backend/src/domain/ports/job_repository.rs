//! Driven port for job posting persistence.
use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Job, JobDraft, JobId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by job repository adapters.
    pub enum JobPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "job repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError>;

    /// All postings, oldest first.
    async fn list(&self) -> Result<Vec<Job>, JobPersistenceError>;

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobPersistenceError>;

    /// Overwrite the editable fields. Returns the updated job, or `None` when
    /// no posting has that id.
    async fn update(
        &self,
        id: &JobId,
        draft: &JobDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Job>, JobPersistenceError>;

    /// Delete the posting and every application that references it in one
    /// unit of work. Returns `false` when no posting has that id.
    async fn delete(&self, id: &JobId) -> Result<bool, JobPersistenceError>;
}
