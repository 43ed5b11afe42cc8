//! Application workflow service.
//!
//! Takes an identity already verified by the authentication gate and hands
//! the catalog the work of enforcing foreign keys and uniqueness.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{ApplicationListing, ApplicationWorkflow, RelationalCatalog};
use crate::domain::{Application, Error, JobId, UserId};

/// [`ApplicationWorkflow`] implementation delegating to a catalog.
#[derive(Clone)]
pub struct ApplicationWorkflowService {
    catalog: Arc<dyn RelationalCatalog>,
}

impl ApplicationWorkflowService {
    pub fn new(catalog: Arc<dyn RelationalCatalog>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ApplicationWorkflow for ApplicationWorkflowService {
    async fn apply(&self, user_id: &UserId, job_id: &JobId) -> Result<Application, Error> {
        let application = self.catalog.create_application(user_id, job_id).await?;
        info!(
            user_id = %user_id,
            job_id = %job_id,
            application_id = %application.id(),
            "application submitted"
        );
        Ok(application)
    }

    async fn list_mine(&self, user_id: &UserId) -> Result<ApplicationListing, Error> {
        let applications = self.catalog.list_applications_for_user(user_id).await?;
        Ok(ApplicationListing::from(applications))
    }
}
