//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Store a new user, returning it with its assigned id
    ///
    /// Fails with `AuthError::UserNameTaken` if the user name exists.
    async fn create(&self, user: &NewUser) -> AuthResult<User>;

    /// Find user by ID
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Find users by IDs (missing ids are skipped)
    async fn find_by_ids(&self, user_ids: &[UserId]) -> AuthResult<Vec<User>>;

    /// Find user by user name (exact match)
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Check if user name exists
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;

    /// Ids of users whose name contains `fragment`, ignoring case
    async fn ids_by_user_name_contains(&self, fragment: &str) -> AuthResult<Vec<UserId>>;

    /// Persist the last login time
    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()>;
}
