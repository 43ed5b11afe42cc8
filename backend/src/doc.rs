//! OpenAPI document for the REST API.
//!
//! Registers every handler path, the response schemas, and the `BearerAuth`
//! security scheme used by the application routes. Served by Swagger UI in
//! debug builds and printed by the `openapi-dump` binary.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::applications::ApplicationResponse;
use crate::inbound::http::jobs::{JobCreatedResponse, JobRequest, JobResponse};
use crate::inbound::http::schemas::{
    ApplicationStatusSchema, ErrorCodeSchema, ErrorSchema, MessageResponse,
};
use crate::inbound::http::users::{
    AuthResponse, LoginRequest, RegisterRequest, UserEnvelope, UserSummary,
};

/// Adds the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let scheme = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some(
                "Token returned by POST /api/v1/users/register or /api/v1/users/login.",
            ))
            .build();
        components.add_security_scheme("BearerAuth", SecurityScheme::Http(scheme));
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Job board API",
        description = "Accounts, job postings, and token-authenticated applications."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::get_user,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::jobs::get_job,
        crate::inbound::http::jobs::update_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::applications::apply,
        crate::inbound::http::applications::list_mine,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ApplicationStatusSchema,
        MessageResponse,
        RegisterRequest,
        LoginRequest,
        UserSummary,
        AuthResponse,
        UserEnvelope,
        JobRequest,
        JobResponse,
        JobCreatedResponse,
        ApplicationResponse,
    )),
    tags(
        (name = "users", description = "Registration, login, and profiles"),
        (name = "jobs", description = "Job postings"),
        (name = "applications", description = "Applying to jobs"),
        (name = "health", description = "Probes for orchestration")
    )
)]
pub struct ApiDoc;
