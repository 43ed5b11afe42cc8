//! Shared helpers for the HTTP integration suites.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use serde_json::{Value, json};

use jobboard::Trace;
use jobboard::inbound::http::configure_api;
use jobboard::inbound::http::state::HttpState;

/// Send a request and return its status with the JSON body (`Null` when
/// the body is empty).
macro_rules! send {
    ($app:expr, $req:expr) => {{
        let res = actix_web::test::call_service($app, $req.to_request()).await;
        let status = res.status();
        let bytes = actix_web::test::read_body(res).await;
        let body: serde_json::Value = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("JSON body")
        };
        (status, body)
    }};
}

/// The production route table over `state`.
pub fn app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(web::scope("/api/v1").configure(configure_api))
}

pub fn jack() -> Value {
    json!({ "name": "Jack", "email": "jack@example.com", "password": "password1" })
}

pub fn posting() -> Value {
    json!({
        "title": "Backend engineer",
        "description": "Build the job board API",
        "company": "Acme",
        "location": "Remote",
    })
}

/// Bearer header value for a token taken from an auth response body.
pub fn bearer(body: &Value) -> (actix_web::http::header::HeaderName, String) {
    let token = body["token"].as_str().expect("token in body");
    (
        actix_web::http::header::AUTHORIZATION,
        format!("Bearer {token}"),
    )
}
