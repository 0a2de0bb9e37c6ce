//! Backend entry-point: loads configuration, wires adapters and serves the
//! accounts API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use accounts_backend::AppSettings;
use accounts_backend::inbound::http::health::HealthState;
use server::{ServerConfig, build_services, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|err| {
        error!(error = %err, "failed to load configuration");
        std::io::Error::other(format!("failed to load configuration: {err}"))
    })?;

    let services = build_services(&settings).await.map_err(|err| {
        error!(error = %err, "startup failed");
        std::io::Error::other(err.to_string())
    })?;

    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::from_settings(&settings);
    let server = create_server(health_state.clone(), &config, services)?;
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
