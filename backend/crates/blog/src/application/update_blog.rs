//! Update Blog Use Case
//!
//! Fields left as `None` keep their stored value; `Some("")` overwrites.

use std::sync::Arc;

use auth::User;

use crate::application::resolve_tags;
use crate::domain::entity::blog::Blog;
use crate::domain::repository::{BlogRepository, TagRepository};
use crate::domain::value_object::{blog_id::BlogId, blog_title::BlogTitle, tag_id::TagId};
use crate::error::{BlogError, BlogResult};

#[derive(Default)]
pub struct UpdateBlogInput {
    pub title: Option<String>,
    pub content: Option<String>,
    /// Replaces the full set when present; `Some(vec![])` clears it
    pub tag_ids: Option<Vec<TagId>>,
}

pub struct UpdateBlogUseCase<B, T>
where
    B: BlogRepository,
    T: TagRepository,
{
    blog_repo: Arc<B>,
    tag_repo: Arc<T>,
}

impl<B, T> UpdateBlogUseCase<B, T>
where
    B: BlogRepository,
    T: TagRepository,
{
    pub fn new(blog_repo: Arc<B>, tag_repo: Arc<T>) -> Self {
        Self {
            blog_repo,
            tag_repo,
        }
    }

    pub async fn execute(
        &self,
        caller: &User,
        blog_id: BlogId,
        input: UpdateBlogInput,
    ) -> BlogResult<Blog> {
        let mut blog = self
            .blog_repo
            .find_by_id(&blog_id)
            .await?
            .ok_or(BlogError::BlogNotFound)?;

        if !blog.is_owned_by(&caller.user_id) {
            tracing::warn!(
                blog_id = %blog_id,
                owner_id = %blog.user_id,
                caller_id = %caller.user_id,
                "Rejected blog update by non-owner"
            );
            return Err(BlogError::NotOwner { resource: "blog" });
        }

        // Validate everything before the first write
        let title = input.title.map(BlogTitle::new).transpose()?;
        let tag_ids = match input.tag_ids {
            Some(ids) => Some(resolve_tags(self.tag_repo.as_ref(), ids).await?),
            None => None,
        };

        let fields_changed = title.is_some() || input.content.is_some();
        if let Some(title) = title {
            blog.title = title;
        }
        if let Some(content) = input.content {
            blog.content = content;
        }

        let blog = match tag_ids {
            Some(tag_ids) if !fields_changed => {
                self.blog_repo.set_tags(&blog_id, &tag_ids).await?;
                blog.set_tags(tag_ids);
                blog
            }
            Some(tag_ids) => {
                blog.set_tags(tag_ids);
                self.blog_repo.update(&blog).await?
            }
            None if fields_changed => self.blog_repo.update(&blog).await?,
            None => blog,
        };

        tracing::info!(blog_id = %blog_id, user_id = %caller.user_id, "Blog updated");

        Ok(blog)
    }
}
