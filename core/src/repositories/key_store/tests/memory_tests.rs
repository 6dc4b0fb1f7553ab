//! Tests for the in-memory key store

use std::sync::Arc;

use crate::domain::value_objects::KeyId;
use crate::repositories::key_store::{KeyStore, MemoryKeyStore};
use crate::testutil::test_key_with_ttl;

#[tokio::test]
async fn test_get_missing_returns_none() {
    let store = MemoryKeyStore::new();
    assert!(store.get(KeyId::new(7)).await.unwrap().is_none());
    assert!(!store.contains(KeyId::new(7)).await.unwrap());
}

#[tokio::test]
async fn test_set_get_overwrite() {
    let store = MemoryKeyStore::new();
    let kid = KeyId::new(42);
    let first = test_key_with_ttl(60);
    let second = test_key_with_ttl(3600);

    store.set(kid, &first).await.unwrap();
    assert_eq!(
        store.get(kid).await.unwrap().unwrap().expires_at(),
        first.expires_at()
    );

    store.set(kid, &second).await.unwrap();
    assert_eq!(
        store.get(kid).await.unwrap().unwrap().expires_at(),
        second.expires_at()
    );
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_insert_new_refuses_taken_identifier() {
    let store = MemoryKeyStore::new();
    let kid = KeyId::new(1);
    let original = test_key_with_ttl(60);

    assert!(store.insert_new(kid, &original).await.unwrap());
    assert!(!store.insert_new(kid, &test_key_with_ttl(3600)).await.unwrap());
    assert_eq!(
        store.get(kid).await.unwrap().unwrap().expires_at(),
        original.expires_at()
    );
}

#[tokio::test]
async fn test_expired_keys_are_returned_as_stored() {
    let store = MemoryKeyStore::new();
    let kid = KeyId::new(3);
    store.set(kid, &test_key_with_ttl(-3600)).await.unwrap();

    let key = store.get(kid).await.unwrap().unwrap();
    assert!(key.is_expired());
    assert!(store.contains(kid).await.unwrap());
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let store = MemoryKeyStore::new();
    let kid = KeyId::new(9);
    store.set(kid, &test_key_with_ttl(60)).await.unwrap();

    store.delete(kid).await.unwrap();
    store.delete(kid).await.unwrap();
    assert!(!store.contains(kid).await.unwrap());
}

#[tokio::test]
async fn test_list_identifiers_and_recreate() {
    let store = MemoryKeyStore::new();
    for id in [5, 1, 3] {
        store.set(KeyId::new(id), &test_key_with_ttl(60)).await.unwrap();
    }

    let mut ids = store.list_identifiers().await.unwrap();
    ids.sort();
    assert_eq!(ids, vec![KeyId::new(1), KeyId::new(3), KeyId::new(5)]);

    store.recreate().await.unwrap();
    assert!(store.list_identifiers().await.unwrap().is_empty());
    assert!(store.is_empty().await);
    assert!(!store.is_persistent());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_insert_new_has_one_winner() {
    let store = Arc::new(MemoryKeyStore::new());
    let kid = KeyId::new(11);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move { store.insert_new(kid, &test_key_with_ttl(60)).await.unwrap() })
        })
        .collect();

    let mut winners = 0;
    for handle in handles {
        if handle.await.unwrap() {
            winners += 1;
        }
    }
    assert_eq!(winners, 1);
}
