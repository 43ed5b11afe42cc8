//! Application handlers. Both routes require a bearer token.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::ApplicationListing;
use crate::domain::{ApiResult, Application, ApplicationStatus, Error};

use super::auth::{AuthenticatedUser, BearerAuth};
use super::schemas::{ErrorSchema, MessageResponse};
use super::state::HttpState;
use super::validation::{JOB_ID, parse_job_id};

/// One of the caller's applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub user_id: String,
    #[schema(example = "9b2e4c1a-0d7f-4a55-8f3e-6c1d2b7a9e10")]
    pub job_id: String,
    #[schema(value_type = crate::inbound::http::schemas::ApplicationStatusSchema)]
    pub status: ApplicationStatus,
}

impl From<&Application> for ApplicationResponse {
    fn from(application: &Application) -> Self {
        Self {
            user_id: application.user_id().to_string(),
            job_id: application.job_id().to_string(),
            status: application.status(),
        }
    }
}

/// Apply to a job as the authenticated caller.
#[utoipa::path(
    post,
    path = "/api/v1/jobs/{jobId}/apply",
    params(("jobId" = String, Path, description = "Job identifier (UUID)")),
    responses(
        (status = 201, description = "Application created", body = MessageResponse),
        (status = 400, description = "Malformed job identifier", body = ErrorSchema),
        (status = 401, description = "Missing or malformed bearer token", body = ErrorSchema),
        (status = 403, description = "Token expired or invalid", body = ErrorSchema),
        (status = 404, description = "Job does not exist", body = ErrorSchema),
        (status = 409, description = "Already applied", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "applyForJob",
    security(("BearerAuth" = []))
)]
#[post("/jobs/{job_id}/apply", wrap = "BearerAuth")]
pub async fn apply(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let job_id = parse_job_id(&path.into_inner(), JOB_ID)?;
    state.applications.apply(&user.user_id(), &job_id).await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Application created successfully!")))
}

/// List the caller's applications, oldest first.
///
/// Having none is reported as 404 rather than an empty list.
#[utoipa::path(
    get,
    path = "/api/v1/user/applications",
    responses(
        (status = 200, description = "The caller's applications", body = [ApplicationResponse]),
        (status = 401, description = "Missing or malformed bearer token", body = ErrorSchema),
        (status = 403, description = "Token expired or invalid", body = ErrorSchema),
        (status = 404, description = "Application not found", body = ErrorSchema)
    ),
    tags = ["applications"],
    operation_id = "listMyApplications",
    security(("BearerAuth" = []))
)]
#[get("/user/applications", wrap = "BearerAuth")]
pub async fn list_mine(
    state: web::Data<HttpState>,
    user: AuthenticatedUser,
) -> ApiResult<web::Json<Vec<ApplicationResponse>>> {
    match state.applications.list_mine(&user.user_id()).await? {
        ApplicationListing::Empty => Err(Error::not_found("Application not found!")),
        ApplicationListing::Found(applications) => Ok(web::Json(
            applications.iter().map(ApplicationResponse::from).collect(),
        )),
    }
}
