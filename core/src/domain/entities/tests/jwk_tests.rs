//! Unit tests for JWK documents

use crate::domain::entities::jwk::{Jwk, Jwks};

#[test]
fn test_jwk_field_names_and_order() {
    let jwk = Jwk::rsa(1234, "modulus".to_string(), "AQAB".to_string());
    let json = serde_json::to_string(&jwk).unwrap();
    assert_eq!(
        json,
        r#"{"kty":"RSA","alg":"RS256","kid":"1234","n":"modulus","e":"AQAB"}"#
    );
}

#[test]
fn test_empty_key_set() {
    let jwks = Jwks::default();
    assert!(jwks.is_empty());
    assert_eq!(serde_json::to_string(&jwks).unwrap(), r#"{"keys":[]}"#);
}

#[test]
fn test_key_set_lookup() {
    let jwks = Jwks {
        keys: vec![
            Jwk::rsa(1, "n1".to_string(), "AQAB".to_string()),
            Jwk::rsa(2, "n2".to_string(), "AQAB".to_string()),
        ],
    };
    assert_eq!(jwks.len(), 2);
    assert_eq!(jwks.find("2").map(|k| k.n.as_str()), Some("n2"));
    assert!(jwks.find("3").is_none());

    let parsed: Jwks = serde_json::from_str(&serde_json::to_string(&jwks).unwrap()).unwrap();
    assert_eq!(parsed, jwks);
}
