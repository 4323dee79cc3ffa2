//! Create Tag Use Case

use std::sync::Arc;

use auth::User;

use crate::domain::entity::tag::{NewTag, Tag};
use crate::domain::repository::TagRepository;
use crate::domain::value_object::tag_name::TagName;
use crate::error::BlogResult;

pub struct CreateTagUseCase<T>
where
    T: TagRepository,
{
    tag_repo: Arc<T>,
}

impl<T> CreateTagUseCase<T>
where
    T: TagRepository,
{
    pub fn new(tag_repo: Arc<T>) -> Self {
        Self { tag_repo }
    }

    pub async fn execute(&self, owner: &User, name: String) -> BlogResult<Tag> {
        let name = TagName::new(name)?;

        let tag = self
            .tag_repo
            .create(&NewTag {
                user_id: owner.user_id,
                name,
            })
            .await?;

        tracing::info!(tag_id = %tag.tag_id, user_id = %owner.user_id, "Tag created");

        Ok(tag)
    }
}
