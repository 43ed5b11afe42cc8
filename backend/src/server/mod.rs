//! Server construction and middleware wiring.

mod config;
mod cors;
mod state_builders;

pub use config::{AppSettings, ServerConfig};
pub use cors::CorsPolicy;

use std::future::Future;

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use jobboard::Trace;
#[cfg(debug_assertions)]
use jobboard::doc::ApiDoc;
use jobboard::inbound::http::configure_api;
use jobboard::inbound::http::health::{HealthState, live, ready};
use jobboard::inbound::http::state::HttpState;

use state_builders::build_http_state;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    cors: &CorsPolicy,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .wrap(cors.to_middleware())
        .service(web::scope("/api/v1").configure(configure_api))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Resolve on SIGINT, or SIGTERM on Unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    result = tokio::signal::ctrl_c() => {
                        if let Err(error) = result {
                            warn!(%error, "SIGINT handler failed");
                        }
                    }
                    _ = terminate.recv() => {}
                }
                return;
            }
            Err(error) => warn!(%error, "SIGTERM handler unavailable; using SIGINT only"),
        }
    }
    if let Err(error) = tokio::signal::ctrl_c().await {
        warn!(%error, "SIGINT handler failed");
    }
}

/// Once `signal` resolves, fail the probes and stop the server gracefully.
async fn drain_on(
    signal: impl Future<Output = ()>,
    health_state: web::Data<HealthState>,
    handle: ServerHandle,
) {
    signal.await;
    info!("shutdown requested; draining connections");
    health_state.mark_unhealthy();
    handle.stop(true).await;
}

/// Bind the HTTP server, mark the process ready, and install the shutdown
/// handler. Must be called from within the actix runtime.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config));
    let server_health_state = health_state.clone();
    let cors = config.cors.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone(), &cors)
    })
    .disable_signals()
    .shutdown_timeout(SHUTDOWN_TIMEOUT_SECS)
    .bind(config.bind_addr)?
    .run();

    actix_web::rt::spawn(drain_on(shutdown_signal(), health_state.clone(), server.handle()));
    health_state.mark_ready();
    Ok(server)
}
