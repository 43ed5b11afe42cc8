//! HTTP inbound adapter exposing the REST API.

pub mod applications;
pub mod auth;
pub mod error;
pub mod health;
pub mod jobs;
pub mod schemas;
pub mod state;
pub mod users;
pub(crate) mod validation;

use actix_web::web;

pub use crate::domain::ApiResult;

/// Register every `/api/v1` route on `cfg`.
///
/// Mount it inside the versioned scope:
///
/// ```
/// use actix_web::{App, web};
/// use jobboard::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(validation::json_config())
        .service(users::register)
        .service(users::login)
        .service(users::get_user)
        .service(jobs::create_job)
        .service(jobs::list_jobs)
        .service(jobs::get_job)
        .service(jobs::update_job)
        .service(jobs::delete_job)
        .service(applications::apply)
        .service(applications::list_mine);
}
