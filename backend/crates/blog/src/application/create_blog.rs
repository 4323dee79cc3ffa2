//! Create Blog Use Case

use std::sync::Arc;

use auth::User;

use crate::application::resolve_tags;
use crate::domain::entity::blog::{Blog, NewBlog};
use crate::domain::repository::{BlogRepository, TagRepository};
use crate::domain::value_object::{blog_title::BlogTitle, tag_id::TagId};
use crate::error::BlogResult;

pub struct CreateBlogInput {
    pub title: String,
    pub content: String,
    /// `None` leaves the (initially empty) tag set untouched
    pub tag_ids: Option<Vec<TagId>>,
}

pub struct CreateBlogUseCase<B, T>
where
    B: BlogRepository,
    T: TagRepository,
{
    blog_repo: Arc<B>,
    tag_repo: Arc<T>,
}

impl<B, T> CreateBlogUseCase<B, T>
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

    pub async fn execute(&self, owner: &User, input: CreateBlogInput) -> BlogResult<Blog> {
        let title = BlogTitle::new(input.title)?;
        let tag_ids = match input.tag_ids {
            Some(ids) => resolve_tags(self.tag_repo.as_ref(), ids).await?,
            None => Vec::new(),
        };

        let blog = self
            .blog_repo
            .create(&NewBlog::new(owner.user_id, title, input.content, tag_ids))
            .await?;

        tracing::info!(
            blog_id = %blog.blog_id,
            user_id = %owner.user_id,
            tags = blog.tag_ids.len(),
            "Blog created"
        );

        Ok(blog)
    }
}
