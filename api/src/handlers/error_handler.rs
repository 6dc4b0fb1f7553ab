//! Mapping of domain errors to HTTP responses

use actix_web::{http::StatusCode, HttpResponse};

use jwks_core::errors::DomainError;
use jwks_shared::errors::{error_codes, ErrorResponse};

/// Build a JSON error response
pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse::new(code, message))
}

/// Convert a domain error to an HTTP response
///
/// `NotFound` maps to 404 and `InvalidInput` to 400. Every other error is a
/// server failure: it is logged and answered with a generic 500 body.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    match &error {
        DomainError::NotFound { .. } => {
            error_response(StatusCode::NOT_FOUND, error_codes::NOT_FOUND, error.to_string())
        }
        DomainError::InvalidInput { .. } => {
            error_response(StatusCode::BAD_REQUEST, error_codes::BAD_REQUEST, error.to_string())
        }
        DomainError::StoreUnavailable { .. } | DomainError::StoreOperationFailed { .. } => {
            tracing::error!(error = %error, "Key store failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::STORAGE_ERROR,
                "Key storage is failing",
            )
        }
        DomainError::Token(_) => {
            tracing::error!(error = %error, "Token operation failure");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                error_codes::TOKEN_ERROR,
                "Token could not be processed",
            )
        }
    }
}

/// Fallback for unknown paths
pub async fn not_found() -> HttpResponse {
    error_response(
        StatusCode::NOT_FOUND,
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
}

/// Fallback for unsupported methods on known paths
pub async fn method_not_allowed() -> HttpResponse {
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        error_codes::METHOD_NOT_ALLOWED,
        "Method not allowed on this resource",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jwks_core::errors::TokenError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::key_not_found(7), StatusCode::NOT_FOUND),
            (
                DomainError::InvalidInput { message: "bad kid".to_string() },
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::StoreOperationFailed { message: "disk full".to_string() },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                DomainError::Token(TokenError::SigningFailed { message: "x".to_string() }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, status) in cases {
            assert_eq!(handle_domain_error(error).status(), status);
        }
    }
}
