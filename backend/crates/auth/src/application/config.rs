//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::token::TokenSigner;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for token signing
    pub jwt_secret: Vec<u8>,
    /// Token lifetime (5 minutes)
    pub jwt_expiration: Duration,
    /// Window after the original issue time in which a token may be refreshed (1 week)
    pub jwt_refresh_expiration: Duration,
    /// Accepted `Authorization` header prefixes
    pub token_prefixes: Vec<String>,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            jwt_expiration: Duration::from_secs(5 * 60),
            jwt_refresh_expiration: Duration::from_secs(7 * 24 * 3600),
            token_prefixes: vec!["JWT".to_string(), "Bearer".to_string()],
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with the given signing secret
    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    /// Create config with a random signing secret (for development)
    ///
    /// Tokens do not survive a restart.
    pub fn development() -> Self {
        Self::with_secret(platform::crypto::random_bytes(32))
    }

    /// Build a signer for the configured secret
    pub fn signer(&self) -> TokenSigner {
        TokenSigner::new(&self.jwt_secret)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Extract the token from an `Authorization` header value
    ///
    /// Returns `None` when no accepted prefix matches.
    pub fn strip_token_prefix<'a>(&self, header: &'a str) -> Option<&'a str> {
        let (prefix, token) = header.trim().split_once(' ')?;
        let token = token.trim();
        (!token.is_empty() && self.token_prefixes.iter().any(|p| p == prefix)).then_some(token)
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("jwt_expiration", &self.jwt_expiration)
            .field("jwt_refresh_expiration", &self.jwt_refresh_expiration)
            .field("token_prefixes", &self.token_prefixes)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert_eq!(config.jwt_expiration, Duration::from_secs(300));
        assert_eq!(config.jwt_refresh_expiration, Duration::from_secs(604_800));
    }

    #[test]
    fn test_strip_token_prefix() {
        let config = AuthConfig::default();
        assert_eq!(config.strip_token_prefix("JWT abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(config.strip_token_prefix("Bearer abc"), Some("abc"));
        assert_eq!(config.strip_token_prefix("Basic abc"), None);
        assert_eq!(config.strip_token_prefix("JWT"), None);
        assert_eq!(config.strip_token_prefix("JWT  "), None);
        assert_eq!(config.strip_token_prefix("jwt abc"), None);
    }

    #[test]
    fn test_development_secret_is_random() {
        assert_ne!(
            AuthConfig::development().jwt_secret,
            AuthConfig::development().jwt_secret
        );
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::with_secret(b"super-secret".to_vec());
        assert!(!format!("{:?}", config).contains("super"));
    }
}
