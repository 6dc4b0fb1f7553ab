//! Shared test utilities for key store and token manager testing.
//!
//! RSA generation dominates test time, so helpers here generate one key pair
//! per process and hand out re-imported copies with whatever expiration the
//! test needs. Feature-gated behind `testutil`:
//!
//! ```toml
//! [dev-dependencies]
//! jwks_core = { path = "../core", features = ["testutil"] }
//! ```

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Utc};
use jwks_shared::config::KeyConfig;

use crate::domain::entities::ExpirableKey;
use crate::services::token::TokenManagerConfig;

/// Smallest modulus size the token manager accepts
pub const TEST_KEY_BITS: usize = 3072;

static SHARED_PEM: OnceLock<String> = OnceLock::new();

fn shared_pem() -> &'static str {
    SHARED_PEM.get_or_init(|| {
        ExpirableKey::generate(TEST_KEY_BITS, Utc::now())
            .expect("test key generation")
            .private_key_pem()
            .to_owned()
    })
}

/// A copy of the shared test key expiring at `expires_at`
pub fn test_key(expires_at: DateTime<Utc>) -> ExpirableKey {
    ExpirableKey::from_pkcs1_pem(shared_pem(), expires_at).expect("shared test key import")
}

/// A copy of the shared test key expiring `ttl_seconds` from now
pub fn test_key_with_ttl(ttl_seconds: i64) -> ExpirableKey {
    test_key(Utc::now() + Duration::seconds(ttl_seconds))
}

/// Token manager configuration with test-sized keys
pub fn test_token_manager_config() -> TokenManagerConfig {
    TokenManagerConfig::from(&test_key_config())
}

/// Key configuration with test-sized keys
pub fn test_key_config() -> KeyConfig {
    KeyConfig::default().with_bits(TEST_KEY_BITS)
}
