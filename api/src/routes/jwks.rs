//! Key set publication

use actix_web::{http::StatusCode, web, HttpResponse};
use serde::Deserialize;

use jwks_core::domain::entities::Jwks;
use jwks_core::domain::value_objects::KeyId;
use jwks_shared::errors::error_codes;

use crate::app::AppState;
use crate::handlers::error_handler::{error_response, handle_domain_error};

/// Query parameters of `GET /.well-known/jwks.json`
#[derive(Debug, Deserialize)]
pub struct KeySetQuery {
    pub kid: Option<String>,
}

/// Handler for GET /.well-known/jwks.json
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {"keys": [{"kty": "RSA", "alg": "RS256", "kid": "1234", "n": "...", "e": "AQAB"}]}
/// ```
///
/// With `?kid=<id>` only that key is returned.
///
/// ## Errors
/// - 400 Bad Request: `kid` is not an integer
/// - 404 Not Found: `kid` is unknown or its key has expired
/// - 500 Internal Server Error: key store failure
pub async fn get_key_set(
    state: web::Data<AppState>,
    query: web::Query<KeySetQuery>,
) -> HttpResponse {
    match query.kid.as_deref() {
        None => match state.token_manager.get_public_key_set().await {
            Ok(jwks) => HttpResponse::Ok().json(jwks),
            Err(error) => handle_domain_error(error),
        },
        Some(raw) => match raw.parse::<KeyId>() {
            Ok(kid) => single_key(&state, kid).await,
            Err(error) => handle_domain_error(error),
        },
    }
}

/// Handler for GET /.well-known/{kid}.json
///
/// Responds with a key set holding the one key, or 404 when the segment does
/// not end in `.json`, is not an integer, or names no live key.
pub async fn get_key_file(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let kid = path
        .as_str()
        .strip_suffix(".json")
        .and_then(|stem| stem.parse::<KeyId>().ok());

    match kid {
        Some(kid) => single_key(&state, kid).await,
        None => error_response(
            StatusCode::NOT_FOUND,
            error_codes::NOT_FOUND,
            "The requested resource was not found",
        ),
    }
}

async fn single_key(state: &AppState, kid: KeyId) -> HttpResponse {
    match state.token_manager.get_public_key(kid).await {
        Ok(jwk) => HttpResponse::Ok().json(Jwks::single(jwk)),
        Err(error) => handle_domain_error(error),
    }
}
