//! Read-only inspection of bearer token claims.
//!
//! The client never verifies tokens (it does not hold the signing secret);
//! it only peeks at the payload to display who is signed in and when the
//! token expires. Authority stays with the server: a 401 still ends the
//! session regardless of what the claims say.

use aula_core::serde::deserialize_optional_id;
use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

/// Claims the API puts in its access tokens. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// User ID (subject claim, or `id` on older tokens)
    #[serde(default, alias = "id", deserialize_with = "deserialize_optional_id")]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Expiration (Unix timestamp)
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at().is_some_and(|exp| exp <= now)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Token is not a readable JWT: {0}")]
pub struct ClaimsError(#[from] jsonwebtoken::errors::Error);

/// Decodes the token payload without checking its signature or expiry.
pub fn peek_claims(token: &str) -> Result<TokenClaims, ClaimsError> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<TokenClaims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;

    fn sign(claims: serde_json::Value) -> String {
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"server-side-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_peek_reads_payload_without_secret() {
        let token = sign(json!({
            "sub": "u-1",
            "email": "ana@colegio.edu",
            "role": "admin",
            "exp": 4_102_444_800i64,
            "iat": 1_700_000_000i64
        }));
        let claims = peek_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("u-1"));
        assert_eq!(claims.role.as_deref(), Some("admin"));
        assert!(!claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_peek_accepts_expired_tokens() {
        let token = sign(json!({ "id": 42, "exp": 1_000 }));
        let claims = peek_claims(&token).unwrap();
        assert_eq!(claims.sub.as_deref(), Some("42"));
        assert!(claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_peek_rejects_garbage() {
        assert!(peek_claims("not-a-token").is_err());
    }
}
