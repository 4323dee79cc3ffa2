//! Token Auth Use Case
//!
//! Exchanges a user name and password for a signed bearer token.

use std::sync::{Arc, LazyLock};

use chrono::Utc;
use platform::token::TokenClaims;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Checked when no user matches, so an unknown name costs the same
/// Argon2 verify as a wrong password
static DUMMY_PASSWORD: LazyLock<Option<UserPassword>> = LazyLock::new(|| {
    UserPassword::from_raw(&RawPassword::candidate("dummy-password".to_string()), None).ok()
});

/// Token auth input
pub struct TokenAuthInput {
    pub user_name: String,
    pub password: String,
}

/// Token auth output
#[derive(Debug, Clone)]
pub struct TokenAuthOutput {
    pub token: String,
    pub claims: TokenClaims,
    /// Epoch seconds until which the token may be refreshed
    pub refresh_expires_in: i64,
}

/// Token auth use case
pub struct TokenAuthUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> TokenAuthUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: TokenAuthInput) -> AuthResult<TokenAuthOutput> {
        let raw_password = RawPassword::candidate(input.password);

        // Malformed names cannot exist in storage
        let found = match UserName::new(&input.user_name) {
            Ok(user_name) => self.user_repo.find_by_user_name(&user_name).await?,
            Err(_) => None,
        };

        let Some(user) = found else {
            if let Some(dummy) = DUMMY_PASSWORD.as_ref() {
                dummy.verify(&raw_password, self.config.pepper());
            }
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password.verify(&raw_password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let (token, claims) = self
            .config
            .signer()
            .issue(user.user_name.as_str(), self.config.jwt_expiration)?;

        let refresh_secs = i64::try_from(self.config.jwt_refresh_expiration.as_secs())
            .map_err(|_| AuthError::Internal("refresh window out of range".to_string()))?;
        let refresh_expires_in = claims.orig_iat.saturating_add(refresh_secs);

        self.user_repo.record_login(&user.user_id, Utc::now()).await?;

        tracing::info!(user_id = %user.user_id, "Token issued");

        Ok(TokenAuthOutput {
            token,
            claims,
            refresh_expires_in,
        })
    }
}
