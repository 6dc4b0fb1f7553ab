//! Integration tests for key store backend selection and persistence

use jwks_core::domain::value_objects::KeyId;
use jwks_core::repositories::KeyStore;
use jwks_core::testutil::{test_key_config, test_key_with_ttl};
use jwks_core::TokenManager;
use jwks_core::TokenManagerConfig;
use jwks_infra::KeyStoreBackend;
use jwks_shared::config::StorageConfig;

#[tokio::test]
async fn test_sqlite_mode_opens_persistent_store() {
    let dir = tempfile::tempdir().unwrap();
    let backend = KeyStoreBackend::connect(&StorageConfig::sqlite(dir.path().join("keys.db"))).await;

    assert!(!backend.is_memory());
    assert!(backend.is_persistent());
    assert_eq!(backend.mode_label(), "persistent");
}

#[tokio::test]
async fn test_unopenable_database_falls_back_to_memory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no-such-dir").join("keys.db");

    let backend = KeyStoreBackend::connect(&StorageConfig::sqlite(path)).await;

    assert!(backend.is_memory());
    assert!(!backend.is_persistent());

    // The fallback store is fully usable
    let kid = KeyId::new(1);
    assert!(backend.insert_new(kid, &test_key_with_ttl(60)).await.unwrap());
    assert!(backend.contains(kid).await.unwrap());
}

#[tokio::test]
async fn test_keys_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::sqlite(dir.path().join("keys.db"));
    let kid = KeyId::new(4242);
    let key = test_key_with_ttl(3600);

    {
        let backend = KeyStoreBackend::connect(&config).await;
        backend.set(kid, &key).await.unwrap();
    }

    let reopened = KeyStoreBackend::connect(&config).await;
    let loaded = reopened.get(kid).await.unwrap().unwrap();
    assert_eq!(loaded.expires_at(), key.expires_at());
    assert_eq!(loaded.modulus(), key.modulus());
}

#[tokio::test]
async fn test_recreate_on_startup_wipes_keys() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::sqlite(dir.path().join("keys.db"));

    {
        let backend = KeyStoreBackend::connect(&config).await;
        backend.set(KeyId::new(1), &test_key_with_ttl(3600)).await.unwrap();
    }

    let backend = KeyStoreBackend::connect(&config.clone().with_recreate_on_startup(true)).await;

    assert!(backend.is_persistent());
    assert!(backend.list_identifiers().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_token_manager_on_sqlite_backend() {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig::sqlite(dir.path().join("keys.db"));
    let manager_config = TokenManagerConfig::from(&test_key_config());

    let token = {
        let backend = KeyStoreBackend::connect(&config).await;
        let manager = TokenManager::new(backend, manager_config.clone()).unwrap();
        let token = manager.create_token(3600).await.unwrap();
        assert_eq!(manager.get_public_key_set().await.unwrap().len(), 1);
        token
    };

    let manager = TokenManager::new(KeyStoreBackend::connect(&config).await, manager_config).unwrap();
    let claims = manager.verify_token(&token).await.unwrap();
    assert_eq!(claims.iss, "feksa");

    manager.reset_keys().await.unwrap();
    assert!(manager.get_public_key_set().await.unwrap().is_empty());
    assert!(manager.store().is_persistent());
}
