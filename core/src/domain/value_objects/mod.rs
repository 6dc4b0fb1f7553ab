//! Value objects representing immutable domain concepts.

pub mod key_id;

pub use key_id::KeyId;
