//! Batched tag lookups for `BlogNode.tags`

use std::collections::HashMap;
use std::sync::Arc;

use async_graphql::ErrorExtensions;
use async_graphql::dataloader::Loader;

use crate::domain::entity::tag::Tag;
use crate::domain::repository::TagRepository;
use crate::domain::value_object::tag_id::TagId;
use crate::infra::store::BlogStore;

pub struct TagLoader {
    store: Arc<BlogStore>,
}

impl TagLoader {
    pub fn new(store: Arc<BlogStore>) -> Self {
        Self { store }
    }
}

impl Loader<TagId> for TagLoader {
    type Value = Tag;
    type Error = async_graphql::Error;

    async fn load(&self, keys: &[TagId]) -> Result<HashMap<TagId, Self::Value>, Self::Error> {
        tracing::debug!(count = keys.len(), "Loading tags");

        let tags = self
            .store
            .find_by_ids(keys)
            .await
            .map_err(|e| e.extend())?;

        Ok(tags.into_iter().map(|tag| (tag.tag_id, tag)).collect())
    }
}
