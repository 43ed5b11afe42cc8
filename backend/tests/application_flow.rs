//! End-to-end flows over the HTTP surface with the in-memory store.

#[macro_use]
mod support;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use futures::future::join_all;
use rstest::rstest;
use serde_json::json;

use jobboard::domain::UserId;
use jobboard::outbound::token::{JwtTokenService, TokenSecret, TokenSettings};
use jobboard::domain::ports::TokenService;
use jobboard::test_support::{TEST_TOKEN_TTL_SECS, memory_state};

use support::{app, bearer, jack, posting};

#[actix_web::test]
async fn jack_registers_logs_in_and_applies_once() {
    let harness = memory_state();
    let app = test::init_service(app(harness.state.clone())).await;

    let (status, registered) = send!(
        &app,
        TestRequest::post().uri("/api/v1/users/register").set_json(jack())
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(registered["message"], "User created successfully!");
    assert_eq!(registered["user"], json!({ "name": "Jack", "email": "jack@example.com" }));

    let (status, logged_in) = send!(
        &app,
        TestRequest::post()
            .uri("/api/v1/users/login")
            .set_json(json!({ "email": "jack@example.com", "password": "password1" }))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(logged_in["message"], "Login successfully!");

    let (status, created) = send!(
        &app,
        TestRequest::post().uri("/api/v1/jobs").set_json(posting())
    );
    assert_eq!(status, StatusCode::CREATED);
    let job_id = created["job"]["id"].as_str().expect("job id").to_owned();
    let apply_uri = format!("/api/v1/jobs/{job_id}/apply");

    let (status, body) = send!(
        &app,
        TestRequest::post()
            .uri(&apply_uri)
            .insert_header(bearer(&logged_in))
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Application created successfully!");

    let (status, body) = send!(
        &app,
        TestRequest::post()
            .uri(&apply_uri)
            .insert_header(bearer(&logged_in))
    );
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "You have already applied for this job!");
    assert_eq!(harness.store.application_count(), 1);

    let (status, body) = send!(
        &app,
        TestRequest::get()
            .uri("/api/v1/user/applications")
            .insert_header(bearer(&registered))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["jobId"], job_id.as_str());
    assert_eq!(body[0]["status"], "applied");
}

#[actix_web::test]
async fn concurrent_applications_store_one_row() {
    let harness = memory_state();
    let app = test::init_service(app(harness.state.clone())).await;
    let (_, registered) = send!(
        &app,
        TestRequest::post().uri("/api/v1/users/register").set_json(jack())
    );
    let (_, created) = send!(
        &app,
        TestRequest::post().uri("/api/v1/jobs").set_json(posting())
    );
    let apply_uri = format!(
        "/api/v1/jobs/{}/apply",
        created["job"]["id"].as_str().expect("job id")
    );

    let requests = (0..8).map(|_| {
        let req = TestRequest::post()
            .uri(&apply_uri)
            .insert_header(bearer(&registered))
            .to_request();
        test::call_service(&app, req)
    });
    let statuses: Vec<StatusCode> = join_all(requests)
        .await
        .iter()
        .map(|res| res.status())
        .collect();

    let created_count = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let conflict_count = statuses.iter().filter(|s| **s == StatusCode::CONFLICT).count();
    assert_eq!((created_count, conflict_count), (1, 7), "{statuses:?}");
    assert_eq!(harness.store.application_count(), 1);
}

#[actix_web::test]
async fn applying_to_a_missing_job_leaves_no_row() {
    let harness = memory_state();
    let app = test::init_service(app(harness.state.clone())).await;
    let (_, registered) = send!(
        &app,
        TestRequest::post().uri("/api/v1/users/register").set_json(jack())
    );

    let (status, body) = send!(
        &app,
        TestRequest::post()
            .uri("/api/v1/jobs/3fa85f64-5717-4562-b3fc-2c963f66afa6/apply")
            .insert_header(bearer(&registered))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Job does not exist!");
    assert_eq!(harness.store.application_count(), 0);
}

#[actix_web::test]
async fn deleting_a_job_removes_its_applications() {
    let harness = memory_state();
    let app = test::init_service(app(harness.state.clone())).await;
    let (_, registered) = send!(
        &app,
        TestRequest::post().uri("/api/v1/users/register").set_json(jack())
    );
    let (_, created) = send!(
        &app,
        TestRequest::post().uri("/api/v1/jobs").set_json(posting())
    );
    let job_id = created["job"]["id"].as_str().expect("job id").to_owned();
    let (status, _) = send!(
        &app,
        TestRequest::post()
            .uri(&format!("/api/v1/jobs/{job_id}/apply"))
            .insert_header(bearer(&registered))
    );
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send!(
        &app,
        TestRequest::delete().uri(&format!("/api/v1/jobs/{job_id}"))
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Job deleted successfully!");
    assert_eq!(harness.store.application_count(), 0);

    let (status, body) = send!(
        &app,
        TestRequest::get()
            .uri("/api/v1/user/applications")
            .insert_header(bearer(&registered))
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Application not found!");
}

#[rstest]
#[case::no_header(None)]
#[case::wrong_scheme(Some("Basic amFjazpwYXNzd29yZDE="))]
#[case::empty_token(Some("Bearer "))]
#[actix_web::test]
async fn requests_without_a_bearer_token_must_log_in(#[case] authorization: Option<&str>) {
    let app = test::init_service(app(memory_state().state)).await;
    let mut req = TestRequest::get().uri("/api/v1/user/applications");
    if let Some(value) = authorization {
        req = req.insert_header((actix_web::http::header::AUTHORIZATION, value));
    }
    let (status, body) = send!(&app, req);
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Please login again!");
    assert!(body["traceId"].is_string());
}

#[actix_web::test]
async fn tokens_stop_working_after_their_lifetime() {
    let harness = memory_state();
    let app = test::init_service(app(harness.state.clone())).await;
    let (_, registered) = send!(
        &app,
        TestRequest::post().uri("/api/v1/users/register").set_json(jack())
    );

    harness.clock.advance_seconds(i64::try_from(TEST_TOKEN_TTL_SECS).expect("small ttl"));
    let (status, _) = send!(
        &app,
        TestRequest::get()
            .uri("/api/v1/user/applications")
            .insert_header(bearer(&registered))
    );
    assert_eq!(status, StatusCode::NOT_FOUND, "token still valid at expiry instant");

    harness.clock.advance_seconds(1);
    let (status, body) = send!(
        &app,
        TestRequest::get()
            .uri("/api/v1/user/applications")
            .insert_header(bearer(&registered))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Session expired!");
}

#[actix_web::test]
async fn tokens_signed_elsewhere_are_refused() {
    let harness = memory_state();
    let app = test::init_service(app(harness.state.clone())).await;
    let foreign = JwtTokenService::new(
        &TokenSettings::new(TokenSecret::from_bytes(vec![b'x'; 48]), 3_600),
        harness.clock.clone(),
    );
    let token = foreign.issue(&UserId::random()).expect("foreign token");

    let (status, body) = send!(
        &app,
        TestRequest::get()
            .uri("/api/v1/user/applications")
            .insert_header((
                actix_web::http::header::AUTHORIZATION,
                format!("Bearer {token}"),
            ))
    );
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Session expired!");
}
