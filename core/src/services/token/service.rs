//! Token manager implementation

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, EncodingKey, Header, Validation};
use rand::Rng;

use jwks_shared::config::{ExpiredKeyPolicy, KidStrategy};

use crate::domain::entities::{Claims, Jwk, Jwks, JWT_ALGORITHM};
use crate::domain::value_objects::KeyId;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::repositories::KeyStore;

use super::config::TokenManagerConfig;
use super::key_manager::Rs256KeyManager;

/// Issues RS256 tokens and publishes the matching public keys
///
/// Every token is signed by its own freshly generated key. The key is stored
/// under a unique identifier that expires together with the token, and is
/// published as a JWK until then.
pub struct TokenManager<S: KeyStore> {
    store: S,
    config: TokenManagerConfig,
    key_manager: Rs256KeyManager,
    validation: Validation,
}

impl<S: KeyStore> TokenManager<S> {
    /// Creates a new token manager
    ///
    /// # Arguments
    ///
    /// * `store` - Key store holding the signing keys
    /// * `config` - Token manager configuration
    ///
    /// # Returns
    ///
    /// A new `TokenManager`, or `InvalidInput` if the configuration is unusable
    pub fn new(store: S, config: TokenManagerConfig) -> DomainResult<Self> {
        config.validate()?;

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_issuer(&[config.issuer.as_str()]);

        Ok(Self {
            key_manager: Rs256KeyManager::new(config.key_bits),
            store,
            config,
            validation,
        })
    }

    /// The underlying key store
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &TokenManagerConfig {
        &self.config
    }

    /// Issues a token signed by a new key living `ttl_seconds` from now
    ///
    /// A non-positive TTL yields a token whose key is already expired and
    /// therefore never published. The key is persisted as the last step, so
    /// a failure leaves no record behind.
    ///
    /// # Arguments
    ///
    /// * `ttl_seconds` - Lifetime of the token and its key
    ///
    /// # Returns
    ///
    /// The compact JWT, with the key identifier in its `kid` header
    pub async fn create_token(&self, ttl_seconds: i64) -> DomainResult<String> {
        let expires_at = Duration::try_seconds(ttl_seconds)
            .and_then(|ttl| Utc::now().checked_add_signed(ttl))
            .ok_or_else(|| DomainError::InvalidInput {
                message: format!("TTL of {} seconds is out of range", ttl_seconds),
            })?;

        let key = self.key_manager.generate(expires_at).await?;
        let encoding_key = key.encoding_key()?;
        let claims = Claims::new(self.config.issuer.as_str(), key.expires_at());

        for _ in 0..self.config.max_kid_attempts {
            let kid = self.candidate_kid().await?;
            if self.store.contains(kid).await? {
                continue;
            }

            let token = self.sign(kid, &claims, &encoding_key)?;
            if self.store.insert_new(kid, &key).await? {
                tracing::info!(
                    kid = %kid,
                    expires_at = %key.expires_at(),
                    "Issued token"
                );
                return Ok(token);
            }
            tracing::debug!(kid = %kid, "Key identifier taken concurrently, retrying");
        }

        tracing::warn!(
            attempts = self.config.max_kid_attempts,
            "Could not find a free key identifier"
        );
        Err(TokenError::IdentifierSpaceExhausted {
            attempts: self.config.max_kid_attempts,
        }
        .into())
    }

    /// Issues a token with the configured default lifetime
    pub async fn create_default_token(&self) -> DomainResult<String> {
        self.create_token(self.config.default_ttl_seconds).await
    }

    /// Public JWK for `kid`
    ///
    /// Absent and expired keys are both reported as `NotFound`. Under
    /// `PurgeOnRead` an expired key is also deleted from the store.
    pub async fn get_public_key(&self, kid: KeyId) -> DomainResult<Jwk> {
        let key = self
            .store
            .get(kid)
            .await?
            .ok_or_else(|| DomainError::key_not_found(kid))?;

        if key.is_expired() {
            if self.config.expired_key_policy == ExpiredKeyPolicy::PurgeOnRead {
                self.store.delete(kid).await?;
                tracing::warn!(kid = %kid, "Purged expired key");
            }
            return Err(DomainError::key_not_found(kid));
        }

        Ok(Rs256KeyManager::public_jwk(kid, &key))
    }

    /// All unexpired public keys, ordered by ascending identifier
    ///
    /// Keys that expire or disappear while the set is being built are
    /// skipped. Any other failure aborts the whole listing.
    pub async fn get_public_key_set(&self) -> DomainResult<Jwks> {
        let mut kids = self.store.list_identifiers().await?;
        kids.sort_unstable();

        let mut keys = Vec::with_capacity(kids.len());
        for kid in kids {
            match self.get_public_key(kid).await {
                Ok(jwk) => keys.push(jwk),
                Err(DomainError::NotFound { .. }) => continue,
                Err(e) => return Err(e),
            }
        }

        Ok(Jwks { keys })
    }

    /// Verifies a token against its published key
    ///
    /// # Arguments
    ///
    /// * `token` - Compact JWT issued by this manager
    ///
    /// # Returns
    ///
    /// The token's claims, or an error if the key is gone, the signature does
    /// not match or the token has expired
    pub async fn verify_token(&self, token: &str) -> DomainResult<Claims> {
        let header = decode_header(token).map_err(|_| TokenError::InvalidTokenFormat)?;
        if header.alg != JWT_ALGORITHM {
            return Err(TokenError::InvalidTokenFormat.into());
        }
        let kid: KeyId = header
            .kid
            .as_deref()
            .ok_or(TokenError::InvalidTokenFormat)?
            .parse()
            .map_err(|_| TokenError::InvalidTokenFormat)?;

        let jwk = self.get_public_key(kid).await?;
        let decoding_key = Rs256KeyManager::decoding_key(&jwk)?;

        let data = decode::<Claims>(token, &decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::InvalidTokenFormat,
            }
        })?;

        if data.claims.is_expired() {
            return Err(TokenError::TokenExpired.into());
        }
        Ok(data.claims)
    }

    /// Empties the key store; previously issued tokens stop verifying
    pub async fn reset_keys(&self) -> DomainResult<()> {
        self.store.recreate().await?;
        tracing::info!("Key store reset");
        Ok(())
    }

    async fn candidate_kid(&self) -> DomainResult<KeyId> {
        match self.config.kid_strategy {
            KidStrategy::Random { min, max } => {
                Ok(KeyId::new(rand::thread_rng().gen_range(min..=max)))
            }
            KidStrategy::Sequential => {
                let highest = self.store.list_identifiers().await?.into_iter().max();
                match highest {
                    None => Ok(KeyId::new(1)),
                    Some(kid) => kid.value().checked_add(1).map(KeyId::new).ok_or_else(|| {
                        TokenError::IdentifierSpaceExhausted {
                            attempts: self.config.max_kid_attempts,
                        }
                        .into()
                    }),
                }
            }
        }
    }

    fn sign(
        &self,
        kid: KeyId,
        claims: &Claims,
        encoding_key: &EncodingKey,
    ) -> Result<String, TokenError> {
        let mut header = Header::new(JWT_ALGORITHM);
        header.kid = Some(kid.to_string());

        encode(&header, claims, encoding_key).map_err(|e| TokenError::SigningFailed {
            message: e.to_string(),
        })
    }
}
