//! Development-only endpoints

use actix_web::{http::header::ContentType, http::StatusCode, web, HttpResponse};
use serde::Deserialize;

use jwks_shared::errors::error_codes;

use crate::app::AppState;
use crate::handlers::error_handler::{error_response, handle_domain_error};

/// Query parameters of `POST /dev`
#[derive(Debug, Deserialize)]
pub struct DevQuery {
    pub action: Option<String>,
}

/// Handler for POST /dev
///
/// `?action=resetkeys` recreates the key store and answers `Ack`. Only routed
/// when development endpoints are enabled.
pub async fn dev_action(state: web::Data<AppState>, query: web::Query<DevQuery>) -> HttpResponse {
    match query.action.as_deref() {
        Some("resetkeys") => match state.token_manager.reset_keys().await {
            Ok(()) => HttpResponse::Ok()
                .content_type(ContentType::plaintext())
                .body("Ack"),
            Err(error) => handle_domain_error(error),
        },
        other => error_response(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            format!("Unknown dev action: {}", other.unwrap_or("<none>")),
        ),
    }
}
