//! Bearer-token authentication gate.
//!
//! [`BearerAuth`] wraps protected routes. It reads the `Authorization`
//! header, asks the token service for the caller's [`UserId`] and stores it
//! in the request extensions, where handlers pick it up through the
//! [`AuthenticatedUser`] extractor.
//!
//! A missing or malformed header yields `401 "Please login again!"`. Any token
//! the service refuses yields `403 "Session expired!"`; whether it was
//! expired or forged is only logged.

use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::{debug, error};

use crate::domain::{Error, UserId};

use super::state::HttpState;

const LOGIN_AGAIN: &str = "Please login again!";
const SESSION_EXPIRED: &str = "Session expired!";

fn login_again() -> Error {
    Error::unauthorized(LOGIN_AGAIN)
}

/// Extract the token from an `Authorization: Bearer <token>` header value.
fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(req: &ServiceRequest) -> Result<UserId, Error> {
    let raw = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(login_again)?;
    let value = raw.to_str().map_err(|_| login_again())?;
    let token = bearer_token(value).ok_or_else(login_again)?;

    let state = req.app_data::<web::Data<HttpState>>().ok_or_else(|| {
        error!("authentication gate mounted without HTTP state");
        Error::internal("authentication gate is not configured")
    })?;
    state.tokens.verify(token).map_err(|err| {
        debug!(error = %err, "rejected bearer token");
        Error::forbidden(SESSION_EXPIRED)
    })
}

/// Caller identity attached by [`BearerAuth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> UserId {
        self.0
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .copied()
                .ok_or_else(login_again),
        )
    }
}

/// Middleware factory guarding a route with a bearer token.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, get};
/// use jobboard::inbound::http::auth::{AuthenticatedUser, BearerAuth};
///
/// #[get("/me", wrap = "BearerAuth")]
/// async fn me(user: AuthenticatedUser) -> HttpResponse {
///     HttpResponse::Ok().body(user.user_id().to_string())
/// }
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct BearerAuth;

impl<S, B> Transform<S, ServiceRequest> for BearerAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>
        + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = BearerAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BearerAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service produced by [`BearerAuth`].
pub struct BearerAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for BearerAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>
        + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        // Runs inside the returned future so rejections see the request's
        // trace identifier.
        Box::pin(async move {
            match authenticate(&req) {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthenticatedUser(user_id));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => Ok(req.error_response(error).map_into_right_body()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, get};
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockTokenService, TokenError};
    use crate::test_support::memory_state;

    #[get("/whoami", wrap = "BearerAuth")]
    async fn whoami(user: AuthenticatedUser) -> HttpResponse {
        HttpResponse::Ok().body(user.user_id().to_string())
    }

    fn state_with_tokens(tokens: MockTokenService) -> HttpState {
        let mut state = memory_state().state;
        state.tokens = Arc::new(tokens);
        state
    }

    async fn call(state: HttpState, authorization: Option<&str>) -> (StatusCode, Error) {
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(whoami),
        )
        .await;
        let mut req = actix_test::TestRequest::get().uri("/whoami");
        if let Some(value) = authorization {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let res = actix_test::call_service(&app, req.to_request()).await;
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[case::bare_token("Bearer")]
    #[case::blank_token("Bearer    ")]
    #[case::basic_scheme("Basic dXNlcjpwYXNz")]
    #[case::no_scheme("token-without-scheme")]
    fn malformed_headers_carry_no_token(#[case] value: &str) {
        assert_eq!(bearer_token(value), None);
    }

    #[rstest]
    fn scheme_is_case_insensitive() {
        assert_eq!(bearer_token("bearer abc.def"), Some("abc.def"));
    }

    #[actix_web::test]
    async fn missing_header_asks_to_login_again() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().never();
        let (status, body) = call(state_with_tokens(tokens), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.code(), ErrorCode::Unauthorized);
        assert_eq!(body.message(), LOGIN_AGAIN);
    }

    #[actix_web::test]
    async fn malformed_header_asks_to_login_again() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().never();
        let (status, body) = call(state_with_tokens(tokens), Some("Token abc")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.message(), LOGIN_AGAIN);
    }

    #[rstest]
    #[case::expired(TokenError::Expired)]
    #[case::forged(TokenError::invalid("bad signature"))]
    #[actix_web::test]
    async fn refused_tokens_read_as_expired_sessions(#[case] failure: TokenError) {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .withf(|token| token == "abc.def.ghi")
            .times(1)
            .return_once(move |_| Err(failure));
        let (status, body) = call(state_with_tokens(tokens), Some("Bearer abc.def.ghi")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body.code(), ErrorCode::Forbidden);
        assert_eq!(body.message(), SESSION_EXPIRED);
    }

    #[actix_web::test]
    async fn verified_identity_reaches_the_handler() {
        let user_id = UserId::random();
        let mut tokens = MockTokenService::new();
        tokens
            .expect_verify()
            .times(1)
            .return_once(move |_| Ok(user_id));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(state_with_tokens(tokens)))
                .service(whoami),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/whoami")
            .insert_header((header::AUTHORIZATION, "Bearer abc.def.ghi"))
            .to_request();
        let body = actix_test::call_and_read_body(&app, req).await;
        assert_eq!(body, user_id.to_string());
    }

    #[actix_web::test]
    async fn extractor_without_gate_rejects() {
        let app = actix_test::init_service(App::new().route(
            "/open",
            web::get().to(|user: AuthenticatedUser| async move {
                HttpResponse::Ok().body(user.user_id().to_string())
            }),
        ))
        .await;
        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/open").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }
}
