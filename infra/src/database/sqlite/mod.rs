//! SQLite key store implementation

mod key_store_impl;

pub use key_store_impl::SqliteKeyStore;
