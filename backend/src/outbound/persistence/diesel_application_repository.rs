//! PostgreSQL-backed `ApplicationRepository`.
//!
//! `create` checks both referenced rows and inserts inside one transaction.
//! The `(user_id, job_id)` unique constraint and the foreign keys settle any
//! race the checks cannot see, and their violations map to the same domain
//! outcomes as the explicit checks.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{ApplicationPersistenceError, ApplicationRepository};
use crate::domain::{Application, ApplicationId, ApplicationStatus, JobId, UserId};

use super::diesel_basic_error_mapping::{
    ConstraintViolation, constraint_violation, map_basic_diesel_error, map_basic_pool_error,
};
use super::models::{ApplicationRow, NewApplicationRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, jobs, users};

const PAIR_UNIQUE_CONSTRAINT: &str = "applications_user_id_job_id_key";
const USER_FOREIGN_KEY: &str = "applications_user_id_fkey";
const JOB_FOREIGN_KEY: &str = "applications_job_id_fkey";

/// Diesel-backed implementation of the application repository port.
#[derive(Clone)]
pub struct DieselApplicationRepository {
    pool: DbPool,
}

impl DieselApplicationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the create transaction.
#[derive(Debug)]
enum CreateFailure {
    MissingUser,
    MissingJob,
    Database(diesel::result::Error),
}

impl From<diesel::result::Error> for CreateFailure {
    fn from(value: diesel::result::Error) -> Self {
        Self::Database(value)
    }
}

fn map_pool_error(error: PoolError) -> ApplicationPersistenceError {
    map_basic_pool_error(error, ApplicationPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> ApplicationPersistenceError {
    map_basic_diesel_error(
        error,
        ApplicationPersistenceError::query,
        ApplicationPersistenceError::connection,
    )
}

fn map_create_failure(failure: CreateFailure, application: &Application) -> ApplicationPersistenceError {
    let user_id = application.user_id().to_string();
    let job_id = application.job_id().to_string();
    match failure {
        CreateFailure::MissingUser => ApplicationPersistenceError::user_not_found(user_id),
        CreateFailure::MissingJob => ApplicationPersistenceError::job_not_found(job_id),
        CreateFailure::Database(error) => match constraint_violation(&error) {
            Some(violation @ ConstraintViolation::Unique { .. })
                if violation.is(PAIR_UNIQUE_CONSTRAINT) =>
            {
                ApplicationPersistenceError::duplicate(user_id, job_id)
            }
            Some(violation @ ConstraintViolation::ForeignKey { .. })
                if violation.is(USER_FOREIGN_KEY) =>
            {
                ApplicationPersistenceError::user_not_found(user_id)
            }
            Some(violation @ ConstraintViolation::ForeignKey { .. })
                if violation.is(JOB_FOREIGN_KEY) =>
            {
                ApplicationPersistenceError::job_not_found(job_id)
            }
            _ => map_diesel_error(error),
        },
    }
}

fn row_to_application(row: ApplicationRow) -> Result<Application, ApplicationPersistenceError> {
    let status: ApplicationStatus = row
        .status
        .parse()
        .map_err(|err| ApplicationPersistenceError::query(format!("application {}: {err}", row.id)))?;
    Ok(Application::new(
        ApplicationId::from_uuid(row.id),
        UserId::from_uuid(row.user_id),
        JobId::from_uuid(row.job_id),
        status,
        row.created_at,
    ))
}

#[async_trait]
impl ApplicationRepository for DieselApplicationRepository {
    async fn create(&self, application: &Application) -> Result<(), ApplicationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let user_uuid = *application.user_id().as_uuid();
        let job_uuid = *application.job_id().as_uuid();
        let row = NewApplicationRow {
            id: *application.id().as_uuid(),
            user_id: user_uuid,
            job_id: job_uuid,
            status: application.status().as_str(),
            created_at: application.created_at(),
            updated_at: application.created_at(),
        };

        conn.transaction(|conn| {
            async move {
                let user = users::table
                    .find(user_uuid)
                    .select(users::id)
                    .first::<Uuid>(conn)
                    .await
                    .optional()?;
                if user.is_none() {
                    return Err(CreateFailure::MissingUser);
                }

                let job = jobs::table
                    .find(job_uuid)
                    .select(jobs::id)
                    .first::<Uuid>(conn)
                    .await
                    .optional()?;
                if job.is_none() {
                    return Err(CreateFailure::MissingJob);
                }

                diesel::insert_into(applications::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|failure| map_create_failure(failure, application))
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Application>, ApplicationPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = applications::table
            .filter(applications::user_id.eq(*user_id.as_uuid()))
            .order((applications::created_at.asc(), applications::id.asc()))
            .select(ApplicationRow::as_select())
            .load::<ApplicationRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_application).collect()
    }
}
