//! RS256 key management for JWT signing and verification

use chrono::{DateTime, Utc};
use jsonwebtoken::DecodingKey;

use crate::codec::{self, Padding};
use crate::domain::entities::{ExpirableKey, Jwk};
use crate::domain::value_objects::KeyId;
use crate::errors::{DomainResult, TokenError};

/// Manager for the RS256 keys behind issued tokens
///
/// Generates key pairs off the async runtime and converts between stored
/// keys, published JWK entries and `jsonwebtoken` verification keys.
#[derive(Debug, Clone)]
pub struct Rs256KeyManager {
    /// Modulus size of generated keys
    bits: usize,
}

impl Rs256KeyManager {
    pub fn new(bits: usize) -> Self {
        Self { bits }
    }

    /// Generates a key expiring at `expires_at` on the blocking thread pool
    ///
    /// No store lock is held while this runs.
    pub async fn generate(&self, expires_at: DateTime<Utc>) -> DomainResult<ExpirableKey> {
        let bits = self.bits;
        let started = std::time::Instant::now();

        let key = tokio::task::spawn_blocking(move || ExpirableKey::generate(bits, expires_at))
            .await
            .map_err(|e| TokenError::KeyGenerationFailed {
                message: format!("key generation task failed: {}", e),
            })??;

        tracing::debug!(
            bits,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated RSA key pair"
        );
        Ok(key)
    }

    /// Public JWK entry for a stored key
    pub fn public_jwk(kid: KeyId, key: &ExpirableKey) -> Jwk {
        Jwk::rsa(
            kid,
            codec::encode_uint(key.modulus(), Padding::Even),
            codec::encode_uint(key.public_exponent(), Padding::Even),
        )
    }

    /// Verification key built from a published JWK entry
    pub fn decoding_key(jwk: &Jwk) -> Result<DecodingKey, TokenError> {
        DecodingKey::from_rsa_components(&jwk.n, &jwk.e).map_err(|e| TokenError::KeyLoadError {
            message: format!("Invalid public key components for kid {}: {}", jwk.kid, e),
        })
    }
}
