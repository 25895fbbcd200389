//! Gateway entry-point: loads settings, wires the REST adapter into the
//! GraphQL schema and serves it over HTTP.

mod server;

use std::io;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use gateway::domain::Directory;
use gateway::inbound::graphql::build_schema;
use gateway::inbound::http::health::HealthState;
use gateway::outbound::rest::HttpRestBackend;
use gateway::settings::GatewaySettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = GatewaySettings::load()
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    let backend_url = settings.backend_url().map_err(io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let timeout = settings.request_timeout().map_err(io::Error::other)?;

    let backend = HttpRestBackend::with_timeout(backend_url, timeout).map_err(io::Error::other)?;
    info!(backend_url = %backend.base_url(), ?timeout, "REST backend configured");
    let schema = build_schema(Directory::new(Arc::new(backend)));

    let config =
        ServerConfig::new(schema, bind_addr).with_graphiql(settings.graphiql_enabled());
    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
