//! Signed Bearer Tokens
//!
//! HS256 JSON Web Tokens carrying `{ username, exp, origIat }`.
//! Expiry is checked with zero leeway.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Token errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Signature has expired")]
    Expired,

    #[error("Error decoding signature")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// JWT claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub username: String,
    /// Expiry (epoch seconds)
    pub exp: i64,
    /// Issue time of the original token (epoch seconds)
    #[serde(rename = "origIat")]
    pub orig_iat: i64,
}

/// Issues and verifies HS256 tokens with a shared secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a token valid for `ttl` from now
    pub fn issue(&self, username: &str, ttl: Duration) -> Result<(String, TokenClaims), TokenError> {
        self.issue_at(username, Utc::now().timestamp(), ttl)
    }

    /// Issue a token as if it had been created at `issued_at` (epoch seconds)
    pub fn issue_at(
        &self,
        username: &str,
        issued_at: i64,
        ttl: Duration,
    ) -> Result<(String, TokenClaims), TokenError> {
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| TokenError::Signing("token TTL out of range".to_string()))?;

        let claims = TokenClaims {
            username: username.to_string(),
            exp: issued_at.saturating_add(ttl_secs),
            orig_iat: issued_at,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok((token, claims))
    }

    /// Verify signature and expiry, returning the claims
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
