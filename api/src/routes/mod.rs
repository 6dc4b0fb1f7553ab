//! Route handlers
//!
//! This module contains the service endpoints:
//! - Key set publication under `/.well-known`
//! - Token issuance
//! - Development key reset
//! - Health reporting

pub mod auth;
pub mod dev;
pub mod health;
pub mod jwks;

use actix_web::web;

use crate::handlers::error_handler::method_not_allowed;

/// Register every route; `/dev` only exists when `dev_endpoints` is set
pub fn configure(cfg: &mut web::ServiceConfig, dev_endpoints: bool) {
    cfg.service(
        web::resource("/.well-known/jwks.json")
            .route(web::get().to(jwks::get_key_set))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/.well-known/{file}")
            .route(web::get().to(jwks::get_key_file))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/auth")
            .route(web::post().to(auth::issue_token))
            .default_service(web::route().to(method_not_allowed)),
    )
    .service(
        web::resource("/health")
            .route(web::get().to(health::health_check))
            .default_service(web::route().to(method_not_allowed)),
    );

    if dev_endpoints {
        cfg.service(
            web::resource("/dev")
                .route(web::post().to(dev::dev_action))
                .default_service(web::route().to(method_not_allowed)),
        );
    }
}
