//! Batched user lookups for owner fields

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::ErrorExtensions;
use async_graphql::dataloader::Loader;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_id::UserId;
use crate::infra::store::AuthStore;

/// Collects the user ids requested while resolving one level of a query
/// and fetches them with a single `find_by_ids`
pub struct UserLoader {
    store: Arc<AuthStore>,
}

impl UserLoader {
    pub fn new(store: Arc<AuthStore>) -> Self {
        Self { store }
    }
}

impl Loader<UserId> for UserLoader {
    type Value = User;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[UserId]) -> Result<HashMap<UserId, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "Loading users");

        let users = self
            .store
            .find_by_ids(keys)
            .await
            .map_err(|e| e.extend())?;

        Ok(users.into_iter().map(|user| (user.user_id, user)).collect())
    }
}
