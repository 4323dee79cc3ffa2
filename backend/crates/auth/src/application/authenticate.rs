//! Authenticate Use Case
//!
//! Resolves a bearer token to the User it was issued for.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};
use platform::token::TokenError;

/// Authenticate use case
pub struct AuthenticateUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> AuthenticateUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Verify the token and load its user
    ///
    /// A valid token for a user that no longer exists is treated as invalid.
    pub async fn execute(&self, token: &str) -> AuthResult<User> {
        let claims = self.config.signer().verify(token)?;

        let user_name = UserName::from_db(claims.username);
        self.user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::Token(TokenError::Invalid))
    }
}
