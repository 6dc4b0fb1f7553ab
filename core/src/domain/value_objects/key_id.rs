//! Key identifier (`kid`).

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Integer identifier of a stored signing key
///
/// Appears as a decimal string in token headers and JWK entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyId(i64);

impl KeyId {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }
}

impl From<i64> for KeyId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for KeyId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<i64>()
            .map(KeyId)
            .map_err(|_| DomainError::InvalidInput {
                message: format!("malformed key identifier '{}'", s),
            })
    }
}
