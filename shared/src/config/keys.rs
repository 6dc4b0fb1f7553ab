//! Signing key and token issuance configuration

use serde::{Deserialize, Serialize};

/// Default RSA modulus size in bits
pub const DEFAULT_KEY_BITS: usize = 3072;

/// Default token (and key) lifetime in seconds
pub const DEFAULT_TOKEN_TTL_SECONDS: i64 = 3600;

/// Default `iss` claim
pub const DEFAULT_ISSUER: &str = "feksa";

/// What happens to an expired key when it is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpiredKeyPolicy {
    /// Leave the record in storage; lookups still answer not-found
    #[default]
    Retain,
    /// Delete the record, then answer not-found
    PurgeOnRead,
}

impl std::str::FromStr for ExpiredKeyPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "retain" => Ok(ExpiredKeyPolicy::Retain),
            "purge_on_read" | "purge" => Ok(ExpiredKeyPolicy::PurgeOnRead),
            _ => Err(format!("Invalid expired key policy: {}", s)),
        }
    }
}

/// How fresh key identifiers are picked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum KidStrategy {
    /// Uniformly random in `min..=max`
    Random { min: i64, max: i64 },
    /// One past the largest stored identifier
    Sequential,
}

impl Default for KidStrategy {
    fn default() -> Self {
        KidStrategy::Random {
            min: 42,
            max: i32::MAX as i64,
        }
    }
}

impl std::str::FromStr for KidStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "random" => Ok(KidStrategy::default()),
            "sequential" | "autoincrement" => Ok(KidStrategy::Sequential),
            _ => Err(format!("Invalid kid strategy: {}", s)),
        }
    }
}

/// Signing key configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeyConfig {
    /// RSA modulus size in bits
    pub bits: usize,

    /// Lifetime of a freshly issued key, in seconds
    pub default_ttl_seconds: i64,

    /// Value of the `iss` claim
    pub issuer: String,

    /// Expired key handling on lookup
    #[serde(default)]
    pub expired_key_policy: ExpiredKeyPolicy,

    /// Identifier selection
    #[serde(default)]
    pub kid_strategy: KidStrategy,

    /// Identifier picks before giving up on a single issuance
    #[serde(default = "default_max_kid_attempts")]
    pub max_kid_attempts: u32,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            bits: DEFAULT_KEY_BITS,
            default_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            issuer: DEFAULT_ISSUER.to_string(),
            expired_key_policy: ExpiredKeyPolicy::default(),
            kid_strategy: KidStrategy::default(),
            max_kid_attempts: default_max_kid_attempts(),
        }
    }
}

impl KeyConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bits: std::env::var("KEY_BITS")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(defaults.bits),
            default_ttl_seconds: std::env::var("TOKEN_TTL_SECONDS")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(defaults.default_ttl_seconds),
            issuer: std::env::var("TOKEN_ISSUER").unwrap_or(defaults.issuer),
            expired_key_policy: std::env::var("EXPIRED_KEY_POLICY")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.expired_key_policy),
            kid_strategy: std::env::var("KID_STRATEGY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.kid_strategy),
            max_kid_attempts: std::env::var("MAX_KID_ATTEMPTS")
                .ok()
                .and_then(|a| a.parse().ok())
                .unwrap_or(defaults.max_kid_attempts),
        }
    }

    /// Set the RSA modulus size
    pub fn with_bits(mut self, bits: usize) -> Self {
        self.bits = bits;
        self
    }

    /// Set the expired key policy
    pub fn with_expired_key_policy(mut self, policy: ExpiredKeyPolicy) -> Self {
        self.expired_key_policy = policy;
        self
    }

    /// Set the identifier strategy
    pub fn with_kid_strategy(mut self, strategy: KidStrategy) -> Self {
        self.kid_strategy = strategy;
        self
    }
}

fn default_max_kid_attempts() -> u32 {
    64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = KeyConfig::default();
        assert_eq!(config.bits, 3072);
        assert_eq!(config.default_ttl_seconds, 3600);
        assert_eq!(config.issuer, "feksa");
        assert_eq!(config.expired_key_policy, ExpiredKeyPolicy::Retain);
        assert_eq!(
            config.kid_strategy,
            KidStrategy::Random { min: 42, max: 2_147_483_647 }
        );
    }

    #[test]
    fn test_policy_parsing() {
        assert_eq!("retain".parse::<ExpiredKeyPolicy>().unwrap(), ExpiredKeyPolicy::Retain);
        assert_eq!(
            "purge-on-read".parse::<ExpiredKeyPolicy>().unwrap(),
            ExpiredKeyPolicy::PurgeOnRead
        );
        assert!("forget".parse::<ExpiredKeyPolicy>().is_err());
    }

    #[test]
    fn test_kid_strategy_parsing() {
        assert_eq!("autoincrement".parse::<KidStrategy>().unwrap(), KidStrategy::Sequential);
        assert_eq!("random".parse::<KidStrategy>().unwrap(), KidStrategy::default());
        assert!("uuid".parse::<KidStrategy>().is_err());
    }
}
