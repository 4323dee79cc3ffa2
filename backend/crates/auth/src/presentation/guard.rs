//! Request identity and the `login_required` guard

use async_graphql::Context;
use platform::token::TokenError;

use crate::domain::entity::user::User;
use crate::error::{AuthError, AuthResult};

/// Identity bound to the current request
#[derive(Debug, Clone, Default)]
pub enum Viewer {
    /// No `Authorization` header
    #[default]
    Anonymous,
    Authenticated(User),
    /// A token was sent but could not be used
    Rejected(TokenError),
    /// The token could not be checked, e.g. the user lookup failed
    Failed(String),
}

impl Viewer {
    pub fn user(&self) -> Option<&User> {
        match self {
            Viewer::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// The authenticated user, or the reason there is none
    pub fn require_user(&self) -> AuthResult<&User> {
        match self {
            Viewer::Authenticated(user) => Ok(user),
            Viewer::Anonymous => Err(AuthError::LoginRequired),
            Viewer::Rejected(e) => Err(AuthError::Token(e.clone())),
            Viewer::Failed(reason) => Err(AuthError::Internal(reason.clone())),
        }
    }
}

/// Guard for resolvers that need an authenticated caller
///
/// Call first in the resolver, before touching storage.
pub fn login_required<'a>(ctx: &Context<'a>) -> AuthResult<&'a User> {
    match ctx.data_opt::<Viewer>() {
        Some(viewer) => viewer.require_user(),
        None => Err(AuthError::LoginRequired),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_requires_login() {
        let err = Viewer::Anonymous.require_user().unwrap_err();
        assert!(matches!(err, AuthError::LoginRequired));
        assert_eq!(err.kind().graphql_code(), "AuthenticationError");
    }

    #[test]
    fn test_rejected_keeps_reason() {
        let err = Viewer::Rejected(TokenError::Expired)
            .require_user()
            .unwrap_err();
        assert_eq!(err.to_string(), "Signature has expired");
        assert_eq!(err.kind().graphql_code(), "AuthenticationError");
    }

    #[test]
    fn test_failed_lookup_is_internal() {
        let err = Viewer::Failed("Database error: pool timed out".to_string())
            .require_user()
            .unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(err.kind().graphql_code(), "InternalError");
    }
}
