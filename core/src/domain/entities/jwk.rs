//! JSON Web Key and key set documents (RFC 7517).

use serde::{Deserialize, Serialize};

/// Public half of one signing key
///
/// Field order is the serialized order: `kty`, `alg`, `kid`, `n`, `e`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwk {
    /// Key type, always `RSA`
    pub kty: String,
    /// Signing algorithm, always `RS256`
    pub alg: String,
    /// Key identifier as a decimal string
    pub kid: String,
    /// Modulus, base64url
    pub n: String,
    /// Public exponent, base64url
    pub e: String,
}

impl Jwk {
    /// Builds an RS256 RSA key entry
    pub fn rsa(kid: impl ToString, n: String, e: String) -> Self {
        Self {
            kty: "RSA".to_string(),
            alg: "RS256".to_string(),
            kid: kid.to_string(),
            n,
            e,
        }
    }
}

/// A key set document, `{"keys": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jwks {
    pub keys: Vec<Jwk>,
}

impl Jwks {
    /// A set holding exactly one key
    pub fn single(key: Jwk) -> Self {
        Self { keys: vec![key] }
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Looks a key up by its identifier
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}
