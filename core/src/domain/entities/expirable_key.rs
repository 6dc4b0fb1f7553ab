//! RSA signing key with a fixed expiration.

use chrono::{DateTime, Utc};
use jsonwebtoken::EncodingKey;
use rsa::pkcs1::{DecodeRsaPrivateKey, EncodeRsaPrivateKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{BigUint, RsaPrivateKey};

use crate::errors::TokenError;

/// An RSA key pair that stops being published once `expires_at` is reached
///
/// Built once, either freshly generated or imported from its PKCS#1 PEM form,
/// and never mutated afterwards.
#[derive(Clone)]
pub struct ExpirableKey {
    private_key: RsaPrivateKey,
    private_pem: String,
    expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for ExpirableKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpirableKey")
            .field("bits", &self.bits())
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

impl ExpirableKey {
    /// Generates a fresh key pair of `bits` bits
    ///
    /// This is slow for production key sizes. On the async runtime call it
    /// through `tokio::task::spawn_blocking`.
    pub fn generate(bits: usize, expires_at: DateTime<Utc>) -> Result<Self, TokenError> {
        let private_key = RsaPrivateKey::new(&mut rand::thread_rng(), bits).map_err(|e| {
            TokenError::KeyGenerationFailed {
                message: format!("RSA-{} generation failed: {}", bits, e),
            }
        })?;
        let private_pem = private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| TokenError::KeyGenerationFailed {
                message: format!("PKCS#1 export failed: {}", e),
            })?
            .as_str()
            .to_owned();

        Ok(Self {
            private_key,
            private_pem,
            expires_at: truncate_to_seconds(expires_at),
        })
    }

    /// Imports a key from its PKCS#1 PEM export
    pub fn from_pkcs1_pem(pem: &str, expires_at: DateTime<Utc>) -> Result<Self, TokenError> {
        let private_key =
            RsaPrivateKey::from_pkcs1_pem(pem).map_err(|e| TokenError::KeyLoadError {
                message: format!("Invalid private key format: {}", e),
            })?;

        Ok(Self {
            private_key,
            private_pem: pem.to_owned(),
            expires_at: truncate_to_seconds(expires_at),
        })
    }

    /// Modulus `n`
    pub fn modulus(&self) -> &BigUint {
        self.private_key.n()
    }

    /// Public exponent `e`
    pub fn public_exponent(&self) -> &BigUint {
        self.private_key.e()
    }

    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        self.private_key.size() * 8
    }

    /// PKCS#1 PEM export of the private key; this is what the key store persists
    pub fn private_key_pem(&self) -> &str {
        &self.private_pem
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// True once the current time has reached the expiration
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expiry check against an explicit instant, at second granularity
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at.timestamp()
    }

    /// RS256 signing key for `jsonwebtoken`
    pub fn encoding_key(&self) -> Result<EncodingKey, TokenError> {
        EncodingKey::from_rsa_pem(self.private_pem.as_bytes()).map_err(|e| {
            TokenError::SigningFailed {
                message: format!("Unusable signing key: {}", e),
            }
        })
    }
}

fn truncate_to_seconds(instant: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp(instant.timestamp(), 0).unwrap_or(instant)
}
