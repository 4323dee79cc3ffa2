//! GraphQL input and payload types

use async_graphql::{InputObject, SimpleObject};
use platform::token::TokenClaims;

use crate::application::token_auth::TokenAuthOutput;
use crate::presentation::node::UserNode;

// ============================================================================
// createUser
// ============================================================================

#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub username: String,
    pub password: String,
    pub email: String,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct CreateUserPayload {
    pub user: Option<UserNode>,
    pub client_mutation_id: Option<String>,
}

// ============================================================================
// tokenAuth
// ============================================================================

/// Decoded claims of an issued token
#[derive(Debug, Clone, SimpleObject)]
pub struct TokenPayload {
    pub username: String,
    pub exp: i64,
    pub orig_iat: i64,
}

impl From<TokenClaims> for TokenPayload {
    fn from(claims: TokenClaims) -> Self {
        Self {
            username: claims.username,
            exp: claims.exp,
            orig_iat: claims.orig_iat,
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "ObtainJSONWebToken")]
pub struct ObtainTokenPayload {
    pub token: String,
    pub payload: TokenPayload,
    pub refresh_expires_in: i64,
}

impl From<TokenAuthOutput> for ObtainTokenPayload {
    fn from(output: TokenAuthOutput) -> Self {
        Self {
            token: output.token,
            payload: output.claims.into(),
            refresh_expires_in: output.refresh_expires_in,
        }
    }
}
