//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod settings;
mod state_builders;

pub use config::ServerConfig;
pub use settings::AppSettings;
#[cfg(feature = "example-data")]
pub use settings::program_only;
pub use state_builders::build_http_state;

#[cfg(feature = "metrics")]
pub use metrics::marketplace_metrics;
#[cfg(feature = "metrics")]
use metrics::PrometheusLayer;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use skillx::Trace;
#[cfg(debug_assertions)]
use skillx::doc::ApiDoc;
use skillx::inbound::http::dashboard::get_dashboard;
use skillx::inbound::http::error::{json_error_handler, query_error_handler};
use skillx::inbound::http::exchange_requests::{
    create_exchange_request, list_exchange_requests, update_exchange_request,
};
use skillx::inbound::http::gig_applications::{
    create_gig_application, list_gig_applications, update_gig_application,
};
use skillx::inbound::http::gigs::{create_gig, delete_gig, get_gig, list_gigs};
use skillx::inbound::http::health::{HealthState, live, ready};
use skillx::inbound::http::profile::{get_profile, upsert_profile};
use skillx::inbound::http::skill_exchange::{create_skill_exchange, list_skill_exchanges};
use skillx::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let api = web::scope("/api/v1")
        .service(create_gig)
        .service(list_gigs)
        .service(get_gig)
        .service(delete_gig)
        .service(create_skill_exchange)
        .service(list_skill_exchanges)
        .service(create_exchange_request)
        .service(list_exchange_requests)
        .service(update_exchange_request)
        .service(create_gig_application)
        .service(list_gig_applications)
        .service(update_gig_application)
        .service(get_profile)
        .service(upsert_profile)
        .service(get_dashboard);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server over prepared state.
///
/// # Parameters
/// - `health_state`: readiness state, marked ready once the socket is bound.
/// - `http_state`: services built by [`build_http_state`].
/// - `config`: binding and optional metrics settings.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
        ..
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = PrometheusLayer::from(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
