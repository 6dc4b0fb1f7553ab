//! Tests verifying issued tokens against published keys

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use crate::domain::entities::Claims;
use crate::errors::{DomainError, TokenError};
use crate::repositories::MemoryKeyStore;
use crate::services::token::TokenManager;
use crate::testutil::test_token_manager_config;

fn create_manager() -> TokenManager<MemoryKeyStore> {
    TokenManager::new(MemoryKeyStore::new(), test_token_manager_config()).unwrap()
}

#[tokio::test]
async fn test_token_verifies_with_published_jwk() {
    let manager = create_manager();
    let token = manager.create_token(3600).await.unwrap();
    let jwk = manager.get_public_key_set().await.unwrap().keys.remove(0);

    let decoding_key = DecodingKey::from_rsa_components(&jwk.n, &jwk.e).unwrap();
    let mut validation = Validation::new(Algorithm::RS256);
    validation.required_spec_claims.clear();
    validation.validate_exp = false;
    let data = decode::<Claims>(&token, &decoding_key, &validation).unwrap();

    assert_eq!(data.claims.iss, "feksa");
    assert!(!data.claims.is_expired());
    assert!(data.claims.exp.parse::<i64>().is_ok());
}

#[tokio::test]
async fn test_verify_token_returns_claims() {
    let manager = create_manager();
    let token = manager.create_token(3600).await.unwrap();

    let claims = manager.verify_token(&token).await.unwrap();

    assert_eq!(claims.iss, "feksa");
    let remaining = claims.expires_at().unwrap() - chrono::Utc::now();
    assert!(remaining.num_seconds() > 3500);
}

#[tokio::test]
async fn test_expired_token_fails_verification() {
    let manager = create_manager();
    let token = manager.create_token(-3600).await.unwrap();

    assert!(matches!(
        manager.verify_token(&token).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_foreign_signature_is_rejected() {
    let manager = create_manager();
    let first = manager.create_token(3600).await.unwrap();
    let second = manager.create_token(3600).await.unwrap();

    let first_parts: Vec<&str> = first.split('.').collect();
    let second_signature = second.rsplit('.').next().unwrap();
    let forged = format!("{}.{}.{}", first_parts[0], first_parts[1], second_signature);

    assert!(matches!(
        manager.verify_token(&forged).await,
        Err(DomainError::Token(TokenError::InvalidSignature))
    ));
}

#[tokio::test]
async fn test_garbage_is_invalid_format() {
    let manager = create_manager();

    assert!(matches!(
        manager.verify_token("not-a-token").await,
        Err(DomainError::Token(TokenError::InvalidTokenFormat))
    ));
}

#[tokio::test]
async fn test_reset_keys_invalidates_tokens() {
    let manager = create_manager();
    let token = manager.create_token(3600).await.unwrap();
    manager.verify_token(&token).await.unwrap();

    manager.reset_keys().await.unwrap();

    assert!(matches!(
        manager.verify_token(&token).await,
        Err(DomainError::NotFound { .. })
    ));
}
