//! Relational catalog service over the job and application repositories.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    ApplicationPersistenceError, ApplicationRepository, JobPersistenceError, JobRepository,
    RelationalCatalog,
};
use crate::domain::{Application, Error, Job, JobDraft, JobId, UserId};

fn map_job_error(error: JobPersistenceError) -> Error {
    match error {
        JobPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("job repository unavailable: {message}"))
        }
        JobPersistenceError::Query { message } => {
            Error::internal(format!("job repository error: {message}"))
        }
    }
}

fn map_application_error(error: ApplicationPersistenceError) -> Error {
    match error {
        ApplicationPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("application repository unavailable: {message}"))
        }
        ApplicationPersistenceError::Query { message } => {
            Error::internal(format!("application repository error: {message}"))
        }
        ApplicationPersistenceError::UserNotFound { .. } => {
            Error::not_found("Cannot find the user!")
        }
        ApplicationPersistenceError::JobNotFound { .. } => Error::not_found("Job does not exist!"),
        ApplicationPersistenceError::Duplicate { .. } => {
            Error::conflict("You have already applied for this job!")
        }
    }
}

/// [`RelationalCatalog`] implementation.
#[derive(Clone)]
pub struct CatalogService<J, A> {
    jobs: Arc<J>,
    applications: Arc<A>,
    clock: Arc<dyn Clock>,
}

impl<J, A> CatalogService<J, A> {
    pub fn new(jobs: Arc<J>, applications: Arc<A>, clock: Arc<dyn Clock>) -> Self {
        Self {
            jobs,
            applications,
            clock,
        }
    }
}

#[async_trait]
impl<J, A> RelationalCatalog for CatalogService<J, A>
where
    J: JobRepository,
    A: ApplicationRepository,
{
    async fn create_job(&self, draft: JobDraft) -> Result<Job, Error> {
        let job = Job::new(JobId::random(), draft, self.clock.utc());
        self.jobs.insert(&job).await.map_err(map_job_error)?;
        info!(job_id = %job.id(), "job created");
        Ok(job)
    }

    async fn get_job(&self, id: &JobId) -> Result<Job, Error> {
        self.jobs
            .find_by_id(id)
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| Error::not_found("Job does not exist!"))
    }

    async fn list_jobs(&self) -> Result<Vec<Job>, Error> {
        self.jobs.list().await.map_err(map_job_error)
    }

    async fn update_job(&self, id: &JobId, draft: JobDraft) -> Result<Job, Error> {
        self.jobs
            .update(id, &draft, self.clock.utc())
            .await
            .map_err(map_job_error)?
            .ok_or_else(|| Error::not_found("Job not found!"))
    }

    async fn delete_job(&self, id: &JobId) -> Result<(), Error> {
        let removed = self.jobs.delete(id).await.map_err(map_job_error)?;
        if !removed {
            return Err(Error::not_found("Job not found!"));
        }
        info!(job_id = %id, "job deleted with its applications");
        Ok(())
    }

    async fn create_application(
        &self,
        user_id: &UserId,
        job_id: &JobId,
    ) -> Result<Application, Error> {
        let application = Application::submit(*user_id, *job_id, self.clock.utc());
        self.applications
            .create(&application)
            .await
            .map_err(map_application_error)?;
        Ok(application)
    }

    async fn list_applications_for_user(&self, user_id: &UserId) -> Result<Vec<Application>, Error> {
        self.applications
            .list_for_user(user_id)
            .await
            .map_err(map_application_error)
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
