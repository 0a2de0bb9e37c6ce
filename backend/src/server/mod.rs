//! Server construction and middleware wiring.

mod app;
mod config;
mod state_builders;

pub use app::{AppDependencies, build_app};
pub use config::ServerConfig;
pub use state_builders::{AppServices, build_services};

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

use accounts_backend::inbound::http::health::HealthState;

/// Construct the Actix HTTP server.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
    services: AppServices,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let AppServices { http_state, tokens } = services;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            tokens: tokens.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    let (host, port) = config.bind_addr();
    info!(%host, port, "listening");
    health_state.mark_ready();
    Ok(server)
}
