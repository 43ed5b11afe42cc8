//! In-memory adapter implementing every repository port.
//!
//! A single mutex guards users, jobs, and applications together, so the
//! existence checks and the insert of an application happen under one lock
//! and a job delete removes its applications atomically. Used when no
//! database is configured and throughout the test suites.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::ports::{
    ApplicationPersistenceError, ApplicationRepository, JobPersistenceError, JobRepository,
    StoredCredentials, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Application, EmailAddress, Job, JobDraft, JobId, PasswordDigest, User, UserId,
};

#[derive(Default)]
struct State {
    users: HashMap<UserId, StoredCredentials>,
    user_ids_by_email: HashMap<EmailAddress, UserId>,
    jobs: Vec<Job>,
    applications: Vec<Application>,
}

/// Process-local store. Clone an `Arc` of it to share between services.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }

    /// Number of stored applications; handy for asserting on side effects.
    pub fn application_count(&self) -> usize {
        self.lock().map_or(0, |state| state.applications.len())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn insert(&self, user: &User, digest: &PasswordDigest) -> Result<(), UserPersistenceError> {
        let mut state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        if state.user_ids_by_email.contains_key(user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        state
            .user_ids_by_email
            .insert(user.email().clone(), user.id());
        state.users.insert(
            user.id(),
            StoredCredentials {
                user: user.clone(),
                digest: digest.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<StoredCredentials>, UserPersistenceError> {
        let state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state
            .user_ids_by_email
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.lock().ok_or_else(|| UserPersistenceError::query(POISONED))?;
        Ok(state.users.get(id).map(|stored| stored.user.clone()))
    }
}

#[async_trait]
impl JobRepository for InMemoryStore {
    async fn insert(&self, job: &Job) -> Result<(), JobPersistenceError> {
        let mut state = self.lock().ok_or_else(|| JobPersistenceError::query(POISONED))?;
        state.jobs.push(job.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Job>, JobPersistenceError> {
        let state = self.lock().ok_or_else(|| JobPersistenceError::query(POISONED))?;
        Ok(state.jobs.clone())
    }

    async fn find_by_id(&self, id: &JobId) -> Result<Option<Job>, JobPersistenceError> {
        let state = self.lock().ok_or_else(|| JobPersistenceError::query(POISONED))?;
        Ok(state.jobs.iter().find(|job| job.id() == *id).cloned())
    }

    async fn update(
        &self,
        id: &JobId,
        draft: &JobDraft,
        _updated_at: DateTime<Utc>,
    ) -> Result<Option<Job>, JobPersistenceError> {
        let mut state = self.lock().ok_or_else(|| JobPersistenceError::query(POISONED))?;
        let Some(slot) = state.jobs.iter_mut().find(|job| job.id() == *id) else {
            return Ok(None);
        };
        *slot = slot.clone().with_draft(draft.clone());
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobPersistenceError> {
        let mut state = self.lock().ok_or_else(|| JobPersistenceError::query(POISONED))?;
        let before = state.jobs.len();
        state.jobs.retain(|job| job.id() != *id);
        if state.jobs.len() == before {
            return Ok(false);
        }
        state
            .applications
            .retain(|application| application.job_id() != *id);
        Ok(true)
    }
}

#[async_trait]
impl ApplicationRepository for InMemoryStore {
    async fn create(&self, application: &Application) -> Result<(), ApplicationPersistenceError> {
        let mut state = self
            .lock()
            .ok_or_else(|| ApplicationPersistenceError::query(POISONED))?;
        let user_id = application.user_id();
        let job_id = application.job_id();
        if !state.users.contains_key(&user_id) {
            return Err(ApplicationPersistenceError::user_not_found(user_id.to_string()));
        }
        if !state.jobs.iter().any(|job| job.id() == job_id) {
            return Err(ApplicationPersistenceError::job_not_found(job_id.to_string()));
        }
        if state
            .applications
            .iter()
            .any(|existing| existing.user_id() == user_id && existing.job_id() == job_id)
        {
            return Err(ApplicationPersistenceError::duplicate(
                user_id.to_string(),
                job_id.to_string(),
            ));
        }
        state.applications.push(application.clone());
        Ok(())
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Application>, ApplicationPersistenceError> {
        let state = self
            .lock()
            .ok_or_else(|| ApplicationPersistenceError::query(POISONED))?;
        Ok(state
            .applications
            .iter()
            .filter(|application| application.user_id() == *user_id)
            .cloned()
            .collect())
    }
}
