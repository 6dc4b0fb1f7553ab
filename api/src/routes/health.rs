//! Health reporting

use actix_web::{web, HttpResponse};

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports whether keys are persisted or held in the in-memory fallback.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "jwks-server",
        "version": env!("CARGO_PKG_VERSION"),
        "storage": state.token_manager.store().mode_label(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
