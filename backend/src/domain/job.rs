//! Job postings.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors raised while building job primitives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobValidationError {
    InvalidId,
    /// At least one of the required text fields is blank.
    MissingFields,
}

impl fmt::Display for JobValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidId => write!(f, "job id must be a valid UUID"),
            Self::MissingFields => write!(f, "All fields are required!"),
        }
    }
}

impl std::error::Error for JobValidationError {}

/// Stable job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct JobId(Uuid);

impl JobId {
    pub fn new(id: impl AsRef<str>) -> Result<Self, JobValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(JobValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| JobValidationError::InvalidId)
    }

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

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<JobId> for String {
    fn from(value: JobId) -> Self {
        value.0.to_string()
    }
}

impl TryFrom<String> for JobId {
    type Error = JobValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Editable fields of a posting.
///
/// ## Invariants
/// - Every field is trimmed and non-empty.
///
/// # Examples
/// ```
/// use jobboard::domain::JobDraft;
///
/// let draft = JobDraft::try_from_parts(" Rust dev ", "Build things", "Acme", "Remote")
///     .expect("valid draft");
/// assert_eq!(draft.title(), "Rust dev");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    title: String,
    description: String,
    company: String,
    location: String,
}

impl JobDraft {
    pub fn try_from_parts(
        title: &str,
        description: &str,
        company: &str,
        location: &str,
    ) -> Result<Self, JobValidationError> {
        let fields = [title, description, company, location].map(str::trim);
        if fields.iter().any(|field| field.is_empty()) {
            return Err(JobValidationError::MissingFields);
        }
        let [title, description, company, location] = fields.map(str::to_owned);
        Ok(Self {
            title,
            description,
            company,
            location,
        })
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn description(&self) -> &str {
        self.description.as_str()
    }

    pub fn company(&self) -> &str {
        self.company.as_str()
    }

    pub fn location(&self) -> &str {
        self.location.as_str()
    }
}

/// Published job posting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    id: JobId,
    draft: JobDraft,
    created_at: DateTime<Utc>,
}

impl Job {
    pub fn new(id: JobId, draft: JobDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            draft,
            created_at,
        }
    }

    pub fn id(&self) -> JobId {
        self.id
    }

    pub fn draft(&self) -> &JobDraft {
        &self.draft
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Replace the editable fields, keeping identity and creation time.
    pub fn with_draft(self, draft: JobDraft) -> Self {
        Self { draft, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "d", "c", "l")]
    #[case("t", "  ", "c", "l")]
    #[case("t", "d", "", "l")]
    #[case("t", "d", "c", "\t")]
    fn draft_requires_every_field(
        #[case] title: &str,
        #[case] description: &str,
        #[case] company: &str,
        #[case] location: &str,
    ) {
        let err = JobDraft::try_from_parts(title, description, company, location)
            .expect_err("blank field must fail");
        assert_eq!(err, JobValidationError::MissingFields);
        assert_eq!(err.to_string(), "All fields are required!");
    }

    #[rstest]
    fn draft_trims_fields() {
        let draft = JobDraft::try_from_parts(" t ", " d ", " c ", " l ").expect("valid");
        assert_eq!(
            (draft.title(), draft.description(), draft.company(), draft.location()),
            ("t", "d", "c", "l")
        );
    }

    #[rstest]
    fn job_id_parses_uuid() {
        let id = JobId::random();
        assert_eq!(JobId::new(id.to_string()), Ok(id));
        assert_eq!(JobId::new("42"), Err(JobValidationError::InvalidId));
    }

    #[rstest]
    fn with_draft_keeps_identity() {
        let now = Utc::now();
        let id = JobId::random();
        let original = Job::new(
            id,
            JobDraft::try_from_parts("a", "b", "c", "d").expect("valid"),
            now,
        );
        let updated =
            original.with_draft(JobDraft::try_from_parts("w", "x", "y", "z").expect("valid"));
        assert_eq!(updated.id(), id);
        assert_eq!(updated.created_at(), now);
        assert_eq!(updated.draft().title(), "w");
    }
}
