//! Token issuance

use actix_web::{http::header::ContentType, web, HttpResponse};
use serde::Deserialize;

use crate::app::AppState;
use crate::handlers::error_handler::handle_domain_error;

/// Query parameters of `POST /auth`
#[derive(Debug, Deserialize)]
pub struct IssueQuery {
    pub expired: Option<String>,
}

/// Handler for POST /auth
///
/// Issues a token signed by a new key and returns it as plain text.
/// `?expired=true` issues it already expired, with the negated default TTL,
/// so its key is never published.
///
/// ## Errors
/// - 500 Internal Server Error: key generation, signing or storage failure
pub async fn issue_token(state: web::Data<AppState>, query: web::Query<IssueQuery>) -> HttpResponse {
    let manager = &state.token_manager;
    let issued = if query.expired.as_deref() == Some("true") {
        let ttl_seconds = manager.config().default_ttl_seconds.saturating_neg();
        manager.create_token(ttl_seconds).await
    } else {
        manager.create_default_token().await
    };

    match issued {
        Ok(token) => HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body(token),
        Err(error) => handle_domain_error(error),
    }
}
