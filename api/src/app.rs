//! Application state and factory
//!
//! This module handles the initialization of the application state
//! and provides the factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{web, App};
use tracing_actix_web::TracingLogger;

use jwks_core::errors::DomainResult;
use jwks_core::services::token::{TokenManager, TokenManagerConfig};
use jwks_infra::KeyStoreBackend;
use jwks_shared::config::AppConfig;

use crate::handlers::error_handler::not_found;
use crate::routes;

/// Application state shared by every worker
pub struct AppState {
    /// Token manager over the key store selected at startup
    pub token_manager: Arc<TokenManager<KeyStoreBackend>>,
    /// Whether `POST /dev` is routed
    pub dev_endpoints: bool,
}

impl AppState {
    pub fn new(token_manager: TokenManager<KeyStoreBackend>, dev_endpoints: bool) -> Self {
        Self {
            token_manager: Arc::new(token_manager),
            dev_endpoints,
        }
    }

    /// Build the state from configuration, selecting the key store
    ///
    /// # Returns
    ///
    /// The state, or `InvalidInput` if the key settings are unusable
    pub async fn from_config(config: &AppConfig) -> DomainResult<Self> {
        let backend = KeyStoreBackend::connect(&config.storage).await;
        let token_manager = TokenManager::new(backend, TokenManagerConfig::from(&config.keys))?;

        Ok(Self::new(token_manager, config.server.dev_endpoints))
    }
}

/// Create and configure the application
pub fn create_app(
    app_state: web::Data<AppState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let dev_endpoints = app_state.dev_endpoints;

    App::new()
        .app_data(app_state)
        .wrap(TracingLogger::default())
        .configure(|cfg| routes::configure(cfg, dev_endpoints))
        .default_service(web::route().to(not_found))
}
