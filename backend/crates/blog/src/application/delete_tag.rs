//! Delete Tag Use Case
//!
//! Only the owner may delete a tag. Blogs using it lose the tag.

use std::sync::Arc;

use auth::User;

use crate::domain::entity::tag::Tag;
use crate::domain::repository::TagRepository;
use crate::domain::value_object::tag_id::TagId;
use crate::error::{BlogError, BlogResult};

pub struct DeleteTagUseCase<T>
where
    T: TagRepository,
{
    tag_repo: Arc<T>,
}

impl<T> DeleteTagUseCase<T>
where
    T: TagRepository,
{
    pub fn new(tag_repo: Arc<T>) -> Self {
        Self { tag_repo }
    }

    /// Returns the tag as it was before deletion
    pub async fn execute(&self, caller: &User, tag_id: TagId) -> BlogResult<Tag> {
        let tag = self
            .tag_repo
            .find_by_id(&tag_id)
            .await?
            .ok_or(BlogError::TagNotFound)?;

        if !tag.is_owned_by(&caller.user_id) {
            tracing::warn!(
                tag_id = %tag_id,
                owner_id = %tag.user_id,
                caller_id = %caller.user_id,
                "Rejected tag deletion by non-owner"
            );
            return Err(BlogError::NotOwner { resource: "tag" });
        }

        if !self.tag_repo.delete(&tag_id).await? {
            return Err(BlogError::TagNotFound);
        }

        tracing::info!(tag_id = %tag_id, user_id = %caller.user_id, "Tag deleted");

        Ok(tag)
    }
}
