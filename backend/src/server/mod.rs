//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::domain::ports::{FixtureTutorialRepository, TutorialRepository};
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::tutorials::{
    create_tutorial, delete_tutorial, get_tutorial, list_published_tutorials,
    list_sorted_tutorials, list_tutorials_by_title_sorted, list_tutorials_paged, update_tutorial,
};
use backend::outbound::persistence::DieselTutorialRepository;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Build the tutorials port from configuration.
///
/// Uses the Diesel adapter when a pool is available, otherwise falls back to
/// the fixture repository so the server can still start without a database.
fn build_tutorials_port(config: &ServerConfig) -> Arc<dyn TutorialRepository> {
    match &config.db_pool {
        Some(pool) => Arc::new(DieselTutorialRepository::new(pool.clone())),
        None => {
            warn!("no database configured; serving from the fixture repository");
            Arc::new(FixtureTutorialRepository)
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api")
        .service(list_sorted_tutorials)
        .service(list_tutorials_paged)
        .service(list_published_tutorials)
        .service(list_tutorials_by_title_sorted)
        .service(get_tutorial)
        .service(create_tutorial)
        .service(update_tutorial)
        .service(delete_tutorial);

    let mut app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    {
        app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    app
}

/// Bind the HTTP server described by `config`.
///
/// Returns the running server future together with the health state so the
/// caller can mark readiness once startup completes.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the listener cannot bind.
pub fn build_server(config: ServerConfig) -> std::io::Result<(Server, web::Data<HealthState>)> {
    let http_state = web::Data::new(HttpState::new(build_tutorials_port(&config)));
    let health_state = web::Data::new(HealthState::new());

    let factory_health = health_state.clone();
    let server = HttpServer::new(move || build_app(factory_health.clone(), http_state.clone()))
        .bind(config.bind_addr)?
        .run();

    Ok((server, health_state))
}
