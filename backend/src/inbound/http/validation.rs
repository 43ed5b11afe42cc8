//! Request validation helpers shared by the HTTP handlers.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{Error, JobId, UserId};

/// Field name used in validation error details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const USER_ID: FieldName = FieldName::new("id");
pub(crate) const JOB_ID: FieldName = FieldName::new("jobId");

pub(crate) fn invalid_uuid_error(field: FieldName, value: &str) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": "invalid_uuid",
    }))
}

pub(crate) fn parse_uuid(value: &str, field: FieldName) -> Result<Uuid, Error> {
    Uuid::parse_str(value).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_user_id(value: &str) -> Result<UserId, Error> {
    parse_uuid(value, USER_ID).map(UserId::from_uuid)
}

pub(crate) fn parse_job_id(value: &str, field: FieldName) -> Result<JobId, Error> {
    parse_uuid(value, field).map(JobId::from_uuid)
}

/// Turn JSON body failures (syntax, unknown fields, wrong content type) into
/// the standard error envelope.
pub(crate) fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected JSON payload");
    let details = match &err {
        JsonPayloadError::ContentType => json!({ "code": "unsupported_content_type" }),
        JsonPayloadError::Deserialize(inner) => {
            json!({ "code": "invalid_body", "reason": inner.to_string() })
        }
        _ => json!({ "code": "invalid_body" }),
    };
    Error::invalid_request("Request body is not valid JSON for this endpoint.")
        .with_details(details)
        .into()
}

/// `JsonConfig` that reports payload failures as [`Error`] bodies.
pub(crate) fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case("not-a-uuid")]
    #[case("")]
    #[case("123e4567-e89b-12d3-a456")]
    fn bad_uuids_name_the_field(#[case] raw: &str) {
        let err = parse_job_id(raw, JOB_ID).expect_err("invalid id");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "jobId must be a valid UUID");
        let details = err.details().expect("details");
        assert_eq!(details["field"], "jobId");
        assert_eq!(details["value"], raw);
    }

    #[rstest]
    fn valid_uuid_parses_to_user_id() {
        let id = UserId::random();
        assert_eq!(parse_user_id(&id.to_string()).expect("valid id"), id);
    }
}
