//! Token module for RS256 issuance and key publication
//!
//! This module handles:
//! - Per-token RSA key generation and identifier assignment
//! - JWT signing with the `kid` header
//! - Public JWK and key set lookup with expiry handling
//! - Verification of issued tokens against published keys

mod config;
mod key_manager;
mod service;

#[cfg(test)]
mod tests;

pub use config::{TokenManagerConfig, KEY_BITS_STEP, MAX_KEY_BITS, MIN_KEY_BITS};
pub use key_manager::Rs256KeyManager;
pub use service::TokenManager;
