//! Account handlers: registration, login, and public profile lookup.
//!
//! ```text
//! POST /api/v1/users/register {"name":"Jack","email":"jack@example.com","password":"password1"}
//! POST /api/v1/users/login    {"email":"jack@example.com","password":"password1"}
//! GET  /api/v1/users/{id}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{
    ApiResult, CredentialValidationError, Error, LoginCredentials, Registration, User,
};

use super::schemas::ErrorSchema;
use super::state::HttpState;
use super::validation::parse_user_id;

/// Body of `POST /api/v1/users/register`.
///
/// Absent fields deserialise as empty strings so they surface as
/// "All fields are required!" rather than a JSON error.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct RegisterRequest {
    #[serde(default)]
    #[schema(example = "Jack")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "jack@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "password1")]
    pub password: String,
}

/// Body of `POST /api/v1/users/login`.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    #[serde(default)]
    #[schema(example = "jack@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "password1")]
    pub password: String,
}

/// Public view of an account.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[schema(example = "Jack")]
    pub name: String,
    #[schema(example = "jack@example.com")]
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

/// Response to a successful registration or login.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    #[schema(example = "Login successfully!")]
    pub message: String,
    pub user: UserSummary,
    /// Bearer token for protected routes.
    pub token: String,
}

/// Response to `GET /api/v1/users/{id}`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    pub user: UserSummary,
}

fn map_credential_validation_error(err: CredentialValidationError) -> Error {
    let field = match err {
        CredentialValidationError::MissingFields => None,
        CredentialValidationError::InvalidEmail => Some("email"),
        CredentialValidationError::PasswordLength { .. } => Some("password"),
    };
    let error = Error::invalid_request(err.to_string());
    match field {
        Some(field) => error.with_details(serde_json::json!({ "field": field })),
        None => error,
    }
}

fn auth_response(state: &HttpState, user: &User, message: &str) -> ApiResult<AuthResponse> {
    let token = state.tokens.issue(&user.id()).map_err(|err| {
        error!(error = %err, user_id = %user.id(), "failed to issue token");
        Error::internal("failed to issue token")
    })?;
    Ok(AuthResponse {
        message: message.to_owned(),
        user: UserSummary::from(user),
        token,
    })
}

/// Create an account and return a token for it.
#[utoipa::path(
    post,
    path = "/api/v1/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = AuthResponse),
        (status = 400, description = "Missing field, bad email, or bad password length", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "register",
    security([])
)]
#[post("/users/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let RegisterRequest {
        name,
        email,
        password,
    } = payload.into_inner();
    let registration = Registration::try_from_parts(&name, &email, &password)
        .map_err(map_credential_validation_error)?;
    let user = state.credentials.register(&registration).await?;
    let body = auth_response(&state, &user, "User created successfully!")?;
    Ok(HttpResponse::Created().json(body))
}

/// Check credentials and return a fresh token.
#[utoipa::path(
    post,
    path = "/api/v1/users/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = AuthResponse),
        (status = 400, description = "Missing field or bad email", body = ErrorSchema),
        (status = 401, description = "Incorrect password", body = ErrorSchema),
        (status = 404, description = "Email is not registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<AuthResponse>> {
    let LoginRequest { email, password } = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&email, &password)
        .map_err(map_credential_validation_error)?;
    let user = state.credentials.verify(&credentials).await?;
    auth_response(&state, &user, "Login successfully!").map(web::Json)
}

/// Fetch the public profile of an account.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User profile", body = UserEnvelope),
        (status = 400, description = "Malformed identifier", body = ErrorSchema),
        (status = 404, description = "Cannot find the user", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser",
    security([])
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = parse_user_id(&path.into_inner())?;
    let user = state.credentials.find(&id).await?;
    Ok(web::Json(UserEnvelope {
        user: UserSummary::from(&user),
    }))
}
