//! Cross-origin policy for browser clients.

use actix_cors::Cors;
use actix_web::http::{Method, Uri, header};

use jobboard::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 3_600;

/// Which origins may call the API from a browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin; the default when no list is configured.
    AnyOrigin,
    /// Only the listed `scheme://host[:port]` origins.
    Origins(Vec<String>),
}

impl CorsPolicy {
    /// Parse a comma-separated origin list. `*` or an empty list allows any
    /// origin.
    ///
    /// # Errors
    /// Returns [`std::io::ErrorKind::InvalidInput`] for an entry that is not
    /// an absolute origin.
    pub fn parse(raw: &str) -> std::io::Result<Self> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.is_empty() || entries.contains(&"*") {
            return Ok(Self::AnyOrigin);
        }
        entries
            .into_iter()
            .map(parse_origin)
            .collect::<std::io::Result<Vec<_>>>()
            .map(Self::Origins)
    }

    pub(super) fn to_middleware(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allowed_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
            .expose_headers([header::HeaderName::from_static(TRACE_ID_HEADER)])
            .max_age(PREFLIGHT_MAX_AGE_SECS);
        match self {
            Self::AnyOrigin => cors.allow_any_origin(),
            Self::Origins(origins) => origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin)),
        }
    }
}

fn parse_origin(entry: &str) -> std::io::Result<String> {
    let invalid = || {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("invalid CORS origin {entry:?}: expected scheme://host[:port]"),
        )
    };
    let uri: Uri = entry.parse().map_err(|_| invalid())?;
    let has_path = uri.path_and_query().is_some_and(|path| path.as_str() != "/");
    if uri.scheme().is_none() || uri.host().is_none() || has_path {
        return Err(invalid());
    }
    Ok(entry.trim_end_matches('/').to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse, web};
    use rstest::rstest;

    #[rstest]
    #[case::unset("")]
    #[case::wildcard("*")]
    #[case::wildcard_in_list("https://jobs.example.com, *")]
    fn wildcards_allow_any_origin(#[case] raw: &str) {
        assert_eq!(CorsPolicy::parse(raw).expect("valid policy"), CorsPolicy::AnyOrigin);
    }

    #[rstest]
    fn origin_lists_are_trimmed() {
        let policy = CorsPolicy::parse(" http://localhost:5173 , https://jobs.example.com/ ")
            .expect("valid policy");
        assert_eq!(
            policy,
            CorsPolicy::Origins(vec![
                "http://localhost:5173".to_owned(),
                "https://jobs.example.com".to_owned(),
            ])
        );
    }

    #[rstest]
    #[case::bare_host("localhost:5173")]
    #[case::with_path("https://jobs.example.com/app")]
    #[case::garbage("not an origin")]
    fn malformed_origins_are_rejected(#[case] raw: &str) {
        let err = CorsPolicy::parse(raw).expect_err("origin should be rejected");
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    async fn preflight(
        policy: &CorsPolicy,
        origin: &str,
    ) -> actix_web::dev::ServiceResponse<actix_web::body::EitherBody<actix_web::body::BoxBody>> {
        let app = actix_test::init_service(
            App::new()
                .wrap(policy.to_middleware())
                .route("/jobs", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = actix_test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/jobs")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
            .to_request();
        actix_test::call_service(&app, req).await
    }

    #[actix_web::test]
    async fn any_origin_answers_preflight() {
        let res = preflight(&CorsPolicy::AnyOrigin, "http://localhost:5173").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[actix_web::test]
    async fn listed_origin_is_echoed_back() {
        let policy = CorsPolicy::Origins(vec!["http://localhost:5173".to_owned()]);
        let res = preflight(&policy, "http://localhost:5173").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(
            res.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .and_then(|value| value.to_str().ok()),
            Some("http://localhost:5173")
        );
    }

    #[actix_web::test]
    async fn unlisted_origin_gets_no_allow_header() {
        let policy = CorsPolicy::Origins(vec!["http://localhost:5173".to_owned()]);
        let res = preflight(&policy, "https://evil.example.com").await;
        assert!(!res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }
}
