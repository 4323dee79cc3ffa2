//! Storage backend selection
//!
//! Resolvers hold one concrete store; the backend is chosen at startup.

use chrono::{DateTime, Utc};

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::AuthResult;
use crate::infra::{memory::MemoryAuthRepository, postgres::PgAuthRepository};

/// User storage, PostgreSQL or in-memory
#[derive(Clone)]
pub enum AuthStore {
    Postgres(PgAuthRepository),
    Memory(MemoryAuthRepository),
}

impl From<PgAuthRepository> for AuthStore {
    fn from(repo: PgAuthRepository) -> Self {
        Self::Postgres(repo)
    }
}

impl From<MemoryAuthRepository> for AuthStore {
    fn from(repo: MemoryAuthRepository) -> Self {
        Self::Memory(repo)
    }
}

impl UserRepository for AuthStore {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        match self {
            Self::Postgres(r) => UserRepository::create(r, user).await,
            Self::Memory(r) => UserRepository::create(r, user).await,
        }
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        match self {
            Self::Postgres(r) => r.find_by_id(user_id).await,
            Self::Memory(r) => r.find_by_id(user_id).await,
        }
    }

    async fn find_by_ids(&self, user_ids: &[UserId]) -> AuthResult<Vec<User>> {
        match self {
            Self::Postgres(r) => r.find_by_ids(user_ids).await,
            Self::Memory(r) => r.find_by_ids(user_ids).await,
        }
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        match self {
            Self::Postgres(r) => r.find_by_user_name(user_name).await,
            Self::Memory(r) => r.find_by_user_name(user_name).await,
        }
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        match self {
            Self::Postgres(r) => r.exists_by_user_name(user_name).await,
            Self::Memory(r) => r.exists_by_user_name(user_name).await,
        }
    }

    async fn ids_by_user_name_contains(&self, fragment: &str) -> AuthResult<Vec<UserId>> {
        match self {
            Self::Postgres(r) => r.ids_by_user_name_contains(fragment).await,
            Self::Memory(r) => r.ids_by_user_name_contains(fragment).await,
        }
    }

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        match self {
            Self::Postgres(r) => r.record_login(user_id, at).await,
            Self::Memory(r) => r.record_login(user_id, at).await,
        }
    }
}
