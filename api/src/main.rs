use actix_web::{web, HttpServer};
use anyhow::Context;

use jwks_api::telemetry::init_tracing;
use jwks_api::{create_app, AppState};
use jwks_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(environment = %config.environment, "Starting JWKS server");
    if config.environment.is_production() && config.server.dev_endpoints {
        tracing::warn!("Development endpoints are enabled in production");
    }

    let state = web::Data::new(
        AppState::from_config(&config)
            .await
            .context("failed to initialize the token manager")?,
    );

    let bind_address = config.server.bind_address();
    tracing::info!(
        address = %bind_address,
        storage = state.token_manager.store().mode_label(),
        dev_endpoints = state.dev_endpoints,
        "Server will bind"
    );

    let mut server = HttpServer::new(move || create_app(state.clone()));
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {}", bind_address))?
        .run()
        .await
        .context("server terminated with an error")?;

    tracing::info!("JWKS server stopped");
    Ok(())
}
