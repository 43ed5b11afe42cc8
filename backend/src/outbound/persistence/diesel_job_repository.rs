//! PostgreSQL-backed `JobRepository`.
//!
//! Deleting a posting removes its applications inside the same transaction
//! before the job row itself, so the cascade holds even against a schema
//! without `ON DELETE CASCADE`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{JobPersistenceError, JobRepository};
use crate::domain::{Job, JobDraft, JobId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{JobRow, JobUpdate, NewJobRow};
use super::pool::{DbPool, PoolError};
use super::schema::{applications, jobs};

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> JobPersistenceError {
    map_basic_pool_error(error, JobPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> JobPersistenceError {
    map_basic_diesel_error(
        error,
        JobPersistenceError::query,
        JobPersistenceError::connection,
    )
}

fn row_to_job(row: JobRow) -> Result<Job, JobPersistenceError> {
    let draft = JobDraft::try_from_parts(&row.title, &row.description, &row.company, &row.location)
        .map_err(|err| JobPersistenceError::query(format!("stored job {}: {err}", row.id)))?;
    Ok(Job::new(JobId::from_uuid(row.id), draft, row.created_at))
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let draft = job.draft();
        let row = NewJobRow {
            id: *job.id().as_uuid(),
            title: draft.title(),
            description: draft.description(),
            company: draft.company(),
            location: draft.location(),
            created_at: job.created_at(),
            updated_at: job.created_at(),
        };
        diesel::insert_into(jobs::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = jobs::table
            .order((jobs::created_at.asc(), jobs::id.asc()))
            .select(JobRow::as_select())
            .load::<JobRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_job).collect()
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = jobs::table
            .find(*id.as_uuid())
            .select(JobRow::as_select())
            .first::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_job).transpose()
    }

    async fn update(
        &self,
        id: &JobId,
        draft: &JobDraft,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Job>, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = JobUpdate {
            title: draft.title(),
            description: draft.description(),
            company: draft.company(),
            location: draft.location(),
            updated_at,
        };
        let row = diesel::update(jobs::table.find(*id.as_uuid()))
            .set(&changes)
            .returning(JobRow::as_returning())
            .get_result::<JobRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_job).transpose()
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let job_uuid = *id.as_uuid();
        let removed = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(applications::table.filter(applications::job_id.eq(job_uuid)))
                        .execute(conn)
                        .await?;
                    let removed = diesel::delete(jobs::table.find(job_uuid))
                        .execute(conn)
                        .await?;
                    Ok(removed > 0)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(removed)
    }
}
