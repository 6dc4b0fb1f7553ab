//! # JWKS Core
//!
//! Core domain layer for the JWKS server.
//! This crate contains the integer codec, signing key entities, the key store
//! contract with its in-memory implementation, the token manager, and the
//! error types shared by the outer layers.

pub mod codec;
pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;

// Re-export commonly used types for convenience
pub use domain::*;
pub use errors::*;
pub use repositories::*;
pub use services::{Rs256KeyManager, TokenManager, TokenManagerConfig};
