//! Token and key material error types
//!
//! These errors cover key generation, key import, signing and the checks
//! performed when a token is verified against the published key set.

use thiserror::Error;

/// Token-related errors
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Key generation failed: {message}")]
    KeyGenerationFailed { message: String },

    #[error("Key load error: {message}")]
    KeyLoadError { message: String },

    #[error("Token signing failed: {message}")]
    SigningFailed { message: String },

    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    TokenExpired,

    #[error("No free key identifier after {attempts} attempts")]
    IdentifierSpaceExhausted { attempts: u32 },
}
