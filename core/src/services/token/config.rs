//! Configuration for the token manager

use jwks_shared::config::{ExpiredKeyPolicy, KeyConfig, KidStrategy};

use crate::errors::{DomainError, DomainResult};

/// Smallest modulus accepted for RS256 signatures
pub const MIN_KEY_BITS: usize = 2048;

/// Largest modulus the signer accepts
pub const MAX_KEY_BITS: usize = 8192;

/// Key sizes must be a multiple of this: 24-bit base64url groups and 512-bit
/// signer limbs both divide it
pub const KEY_BITS_STEP: usize = 1536;

/// Configuration for the token manager
#[derive(Debug, Clone)]
pub struct TokenManagerConfig {
    /// `iss` claim of issued tokens
    pub issuer: String,
    /// Lifetime used by `create_default_token`, in seconds
    pub default_ttl_seconds: i64,
    /// RSA modulus size
    pub key_bits: usize,
    /// Expired key handling on lookup
    pub expired_key_policy: ExpiredKeyPolicy,
    /// Identifier selection
    pub kid_strategy: KidStrategy,
    /// Identifier picks per issuance before giving up
    pub max_kid_attempts: u32,
}

impl Default for TokenManagerConfig {
    fn default() -> Self {
        Self::from(&KeyConfig::default())
    }
}

impl From<&KeyConfig> for TokenManagerConfig {
    fn from(config: &KeyConfig) -> Self {
        Self {
            issuer: config.issuer.clone(),
            default_ttl_seconds: config.default_ttl_seconds,
            key_bits: config.bits,
            expired_key_policy: config.expired_key_policy,
            kid_strategy: config.kid_strategy,
            max_kid_attempts: config.max_kid_attempts,
        }
    }
}

impl TokenManagerConfig {
    /// Checks the settings a token manager cannot work with
    ///
    /// Key sizes must satisfy two layouts at once. A multiple of 24 bits
    /// spans whole 3-byte groups, so the even-padded base64url digits are the
    /// RFC 7518 encoding verifiers expect. A multiple of 512 bits is the only
    /// private modulus the RS256 signer accepts, up to 8192 bits. Both hold
    /// for multiples of 1536: 3072, 4608, 6144 and 7680.
    pub fn validate(&self) -> DomainResult<()> {
        if self.key_bits < MIN_KEY_BITS
            || self.key_bits > MAX_KEY_BITS
            || self.key_bits % KEY_BITS_STEP != 0
        {
            return Err(DomainError::InvalidInput {
                message: format!(
                    "key size must be a multiple of {} bits (24-bit encoding groups and \
                     512-bit signer limbs) between {} and {} bits, got {}",
                    KEY_BITS_STEP, MIN_KEY_BITS, MAX_KEY_BITS, self.key_bits
                ),
            });
        }
        if let KidStrategy::Random { min, max } = self.kid_strategy {
            if min > max {
                return Err(DomainError::InvalidInput {
                    message: format!("empty key identifier range {}..={}", min, max),
                });
            }
        }
        if self.max_kid_attempts == 0 {
            return Err(DomainError::InvalidInput {
                message: "max_kid_attempts must be positive".to_string(),
            });
        }
        Ok(())
    }
}
