//! Token claims for the issued JWTs.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Signing algorithm used for every issued token
pub const JWT_ALGORITHM: jsonwebtoken::Algorithm = jsonwebtoken::Algorithm::RS256;

/// Claims structure for JWT payload
///
/// `exp` is carried as a string of epoch seconds, e.g. `{"iss":"feksa","exp":"1700000000"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Issuer
    pub iss: String,

    /// Expiration, epoch seconds as a decimal string
    pub exp: String,
}

impl Claims {
    /// Creates claims expiring at `expires_at`
    pub fn new(issuer: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            iss: issuer.into(),
            exp: expires_at.timestamp().to_string(),
        }
    }

    /// Parsed expiration, if `exp` holds an integer timestamp
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let seconds: i64 = self.exp.parse().ok()?;
        Utc.timestamp_opt(seconds, 0).single()
    }

    /// Checks if the claims are expired; unparseable `exp` counts as expired
    pub fn is_expired(&self) -> bool {
        self.expires_at().map_or(true, |exp| Utc::now() >= exp)
    }
}
