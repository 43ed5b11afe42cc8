//! Job posting handlers.
//!
//! Postings are public: none of these routes sit behind the bearer gate.

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{ApiResult, Error, Job, JobDraft, JobValidationError};

use super::schemas::{ErrorSchema, MessageResponse};
use super::state::HttpState;
use super::validation::{FieldName, parse_job_id};

const JOB_PATH_ID: FieldName = FieldName::new("id");

/// Body of `POST /api/v1/jobs` and `PUT /api/v1/jobs/{id}`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobRequest {
    #[serde(default)]
    #[schema(example = "Backend engineer")]
    pub title: String,
    #[serde(default)]
    #[schema(example = "Build and run the job board API.")]
    pub description: String,
    #[serde(default)]
    #[schema(example = "Acme")]
    pub company: String,
    #[serde(default)]
    #[schema(example = "Remote")]
    pub location: String,
}

impl TryFrom<JobRequest> for JobDraft {
    type Error = JobValidationError;

    fn try_from(value: JobRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            &value.title,
            &value.description,
            &value.company,
            &value.location,
        )
    }
}

/// A job posting as returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobResponse {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Job> for JobResponse {
    fn from(job: &Job) -> Self {
        let draft = job.draft();
        Self {
            id: job.id().to_string(),
            title: draft.title().to_owned(),
            description: draft.description().to_owned(),
            company: draft.company().to_owned(),
            location: draft.location().to_owned(),
            created_at: job.created_at(),
        }
    }
}

/// Response to `POST /api/v1/jobs`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreatedResponse {
    #[schema(example = "Job created successfully!")]
    pub message: String,
    pub job: JobResponse,
}

fn draft_from(payload: web::Json<JobRequest>) -> ApiResult<JobDraft> {
    JobDraft::try_from(payload.into_inner()).map_err(|err| Error::invalid_request(err.to_string()))
}

/// Publish a job posting.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = JobRequest,
    responses(
        (status = 201, description = "Job created", body = JobCreatedResponse),
        (status = 400, description = "Missing field", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "createJob",
    security([])
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    payload: web::Json<JobRequest>,
) -> ApiResult<HttpResponse> {
    let job = state.catalog.create_job(draft_from(payload)?).await?;
    Ok(HttpResponse::Created().json(JobCreatedResponse {
        message: "Job created successfully!".to_owned(),
        job: JobResponse::from(&job),
    }))
}

/// List every posting, oldest first. An empty board is `[]`.
#[utoipa::path(
    get,
    path = "/api/v1/jobs",
    responses(
        (status = 200, description = "All postings", body = [JobResponse]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/jobs")]
pub async fn list_jobs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<JobResponse>>> {
    let jobs = state.catalog.list_jobs().await?;
    Ok(web::Json(jobs.iter().map(JobResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier (UUID)")),
    responses(
        (status = 200, description = "The posting", body = JobResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Job does not exist", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "getJob",
    security([])
)]
#[get("/jobs/{id}")]
pub async fn get_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<JobResponse>> {
    let id = parse_job_id(&path.into_inner(), JOB_PATH_ID)?;
    let job = state.catalog.get_job(&id).await?;
    Ok(web::Json(JobResponse::from(&job)))
}

#[utoipa::path(
    put,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier (UUID)")),
    request_body = JobRequest,
    responses(
        (status = 200, description = "Job updated", body = MessageResponse),
        (status = 400, description = "Malformed identifier or missing field", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "updateJob",
    security([])
)]
#[put("/jobs/{id}")]
pub async fn update_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<JobRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_job_id(&path.into_inner(), JOB_PATH_ID)?;
    state.catalog.update_job(&id, draft_from(payload)?).await?;
    Ok(web::Json(MessageResponse::new("Job updated successfully!")))
}

/// Remove a posting together with every application to it.
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier (UUID)")),
    responses(
        (status = 200, description = "Job deleted", body = MessageResponse),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob",
    security([])
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    let id = parse_job_id(&path.into_inner(), JOB_PATH_ID)?;
    state.catalog.delete_job(&id).await?;
    Ok(web::Json(MessageResponse::new("Job deleted successfully!")))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;

    use super::*;
    use crate::inbound::http::validation::json_config;
    use crate::test_support::memory_state;

    macro_rules! jobs_app {
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .app_data(json_config())
                    .service(
                        web::scope("/api/v1")
                            .service(create_job)
                            .service(list_jobs)
                            .service(get_job)
                            .service(update_job)
                            .service(delete_job),
                    ),
            )
            .await
        };
    }

    fn posting(title: &str) -> serde_json::Value {
        json!({
            "title": title,
            "description": "Write Rust",
            "company": "Acme",
            "location": "Remote",
        })
    }

    #[actix_web::test]
    async fn create_then_fetch_round_trip() {
        let app = jobs_app!(memory_state().state);
        let req = test::TestRequest::post()
            .uri("/api/v1/jobs")
            .set_json(posting("Engineer"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let created: JobCreatedResponse = test::read_body_json(res).await;
        assert_eq!(created.message, "Job created successfully!");

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/jobs/{}", created.job.id))
            .to_request();
        let fetched: JobResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched, created.job);
    }

    #[actix_web::test]
    async fn empty_board_lists_as_empty_array() {
        let app = jobs_app!(memory_state().state);
        let req = test::TestRequest::get().uri("/api/v1/jobs").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body, json!([]));
    }

    #[actix_web::test]
    async fn blank_field_is_rejected() {
        let app = jobs_app!(memory_state().state);
        let mut body = posting("Engineer");
        body["company"] = json!("  ");
        let req = test::TestRequest::post()
            .uri("/api/v1/jobs")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.message(), "All fields are required!");
    }

    #[actix_web::test]
    async fn unknown_fields_are_rejected() {
        let app = jobs_app!(memory_state().state);
        let mut body = posting("Engineer");
        body["salary"] = json!(100);
        let req = test::TestRequest::post()
            .uri("/api/v1/jobs")
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn missing_job_reads_differently_per_route() {
        let app = jobs_app!(memory_state().state);
        let id = crate::domain::JobId::random();

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/jobs/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.message(), "Job does not exist!");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/v1/jobs/{id}"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let err: Error = test::read_body_json(res).await;
        assert_eq!(err.message(), "Job not found!");
    }

    #[actix_web::test]
    async fn update_replaces_fields() {
        let harness = memory_state();
        let job = harness
            .state
            .catalog
            .create_job(
                JobDraft::try_from_parts("Engineer", "Write Rust", "Acme", "Remote")
                    .expect("valid draft"),
            )
            .await
            .expect("job created");
        let app = jobs_app!(harness.state);

        let req = test::TestRequest::put()
            .uri(&format!("/api/v1/jobs/{}", job.id()))
            .set_json(posting("Staff engineer"))
            .to_request();
        let body: MessageResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.message, "Job updated successfully!");

        let req = test::TestRequest::get()
            .uri(&format!("/api/v1/jobs/{}", job.id()))
            .to_request();
        let fetched: JobResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(fetched.title, "Staff engineer");
    }

    #[actix_web::test]
    async fn malformed_id_is_a_bad_request() {
        let app = jobs_app!(memory_state().state);
        let req = test::TestRequest::get()
            .uri("/api/v1/jobs/not-a-uuid")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
