//! Domain entities: signing keys, published key sets and token claims.

pub mod expirable_key;
pub mod jwk;
pub mod token;

pub use expirable_key::ExpirableKey;
pub use jwk::{Jwk, Jwks};
pub use token::{Claims, JWT_ALGORITHM};

#[cfg(test)]
mod tests;
