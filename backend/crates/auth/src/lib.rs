//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, value objects, repository traits
//! - `application/` - Sign up, token auth, bearer authentication
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - GraphQL node, resolvers, viewer resolution, guard
//!
//! ## Features
//! - User signup with username + email + password
//! - Signed bearer tokens (JWT) via `tokenAuth`
//! - `Authorization: JWT <token>` / `Bearer <token>` request authentication
//! - `login_required` guard for resolvers
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never exposed
//! - Tokens expire (default 5 minutes) and are verified with zero leeway

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use domain::entity::user::User;
pub use domain::repository::UserRepository;
pub use domain::value_object::user_id::UserId;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository, store::AuthStore};
pub use presentation::guard::{Viewer, login_required};
pub use presentation::handlers::{AuthMutation, AuthQuery};
pub use presentation::loader::UserLoader;
pub use presentation::middleware::resolve_viewer;
pub use presentation::node::UserNode;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
