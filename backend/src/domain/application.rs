//! Applications linking a user to a job posting.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{JobId, UserId};

/// Stable application identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of an application.
///
/// New applications start as [`ApplicationStatus::Applied`]; no transition
/// out of that state exists yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Applied,
}

impl ApplicationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
        }
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a stored status string is unknown.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown application status: {0}")]
pub struct UnknownApplicationStatus(pub String);

impl std::str::FromStr for ApplicationStatus {
    type Err = UnknownApplicationStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "applied" => Ok(Self::Applied),
            other => Err(UnknownApplicationStatus(other.to_owned())),
        }
    }
}

/// A user's application to a job.
///
/// ## Invariants
/// - `user_id` and `job_id` referenced existing rows when it was created.
/// - At most one application exists per (`user_id`, `job_id`) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Application {
    id: ApplicationId,
    user_id: UserId,
    job_id: JobId,
    status: ApplicationStatus,
    created_at: DateTime<Utc>,
}

impl Application {
    /// Start a fresh application in the default status.
    pub fn submit(user_id: UserId, job_id: JobId, created_at: DateTime<Utc>) -> Self {
        Self::new(
            ApplicationId::random(),
            user_id,
            job_id,
            ApplicationStatus::default(),
            created_at,
        )
    }

    pub fn new(
        id: ApplicationId,
        user_id: UserId,
        job_id: JobId,
        status: ApplicationStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            job_id,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn status(&self) -> ApplicationStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn submit_defaults_to_applied() {
        let application = Application::submit(UserId::random(), JobId::random(), Utc::now());
        assert_eq!(application.status(), ApplicationStatus::Applied);
    }

    #[rstest]
    fn status_round_trips_through_storage_text() {
        let parsed: ApplicationStatus = ApplicationStatus::Applied
            .as_str()
            .parse()
            .expect("known status");
        assert_eq!(parsed, ApplicationStatus::Applied);
        assert!("withdrawn".parse::<ApplicationStatus>().is_err());
    }

    #[rstest]
    fn status_serialises_lowercase() {
        let value = serde_json::to_value(ApplicationStatus::Applied).expect("serialise");
        assert_eq!(value, serde_json::json!("applied"));
    }
}
