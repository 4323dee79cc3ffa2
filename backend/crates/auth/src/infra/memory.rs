//! In-Memory Repository Implementation
//!
//! Process-local storage used for local development and tests.
//! Ids are assigned from a counter starting at 1.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::entity::user::{NewUser, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Users {
    next_id: i64,
    rows: BTreeMap<i64, User>,
}

/// In-memory auth repository
///
/// Cloning shares the underlying storage.
#[derive(Clone, Default)]
pub struct MemoryAuthRepository {
    users: Arc<RwLock<Users>>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for MemoryAuthRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.users.write().await;

        if users.rows.values().any(|u| u.user_name == user.user_name) {
            return Err(AuthError::UserNameTaken);
        }

        users.next_id += 1;
        let id = users.next_id;
        let created = user.clone().into_user(UserId::from_i64(id));
        users.rows.insert(id, created.clone());

        Ok(created)
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.users.read().await.rows.get(&user_id.as_i64()).cloned())
    }

    async fn find_by_ids(&self, user_ids: &[UserId]) -> AuthResult<Vec<User>> {
        let users = self.users.read().await;
        let mut found: Vec<User> = user_ids
            .iter()
            .filter_map(|id| users.rows.get(&id.as_i64()).cloned())
            .collect();
        found.sort_by_key(|u| u.user_id);
        found.dedup_by_key(|u| u.user_id);
        Ok(found)
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .rows
            .values()
            .find(|u| &u.user_name == user_name)
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users.rows.values().any(|u| &u.user_name == user_name))
    }

    async fn ids_by_user_name_contains(&self, fragment: &str) -> AuthResult<Vec<UserId>> {
        let needle = fragment.to_lowercase();
        let users = self.users.read().await;
        Ok(users
            .rows
            .values()
            .filter(|u| u.user_name.as_str().to_lowercase().contains(&needle))
            .map(|u| u.user_id)
            .collect())
    }

    async fn record_login(&self, user_id: &UserId, at: DateTime<Utc>) -> AuthResult<()> {
        let mut users = self.users.write().await;
        let user = users
            .rows
            .get_mut(&user_id.as_i64())
            .ok_or(AuthError::UserNotFound)?;
        user.last_login = Some(at);
        Ok(())
    }
}
