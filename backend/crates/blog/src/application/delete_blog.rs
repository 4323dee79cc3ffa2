//! Delete Blog Use Case

use std::sync::Arc;

use auth::User;

use crate::domain::entity::blog::Blog;
use crate::domain::repository::BlogRepository;
use crate::domain::value_object::blog_id::BlogId;
use crate::error::{BlogError, BlogResult};

pub struct DeleteBlogUseCase<B>
where
    B: BlogRepository,
{
    blog_repo: Arc<B>,
}

impl<B> DeleteBlogUseCase<B>
where
    B: BlogRepository,
{
    pub fn new(blog_repo: Arc<B>) -> Self {
        Self { blog_repo }
    }

    /// Returns the blog as it was before deletion
    pub async fn execute(&self, caller: &User, blog_id: BlogId) -> BlogResult<Blog> {
        let blog = self
            .blog_repo
            .find_by_id(&blog_id)
            .await?
            .ok_or(BlogError::BlogNotFound)?;

        if !blog.is_owned_by(&caller.user_id) {
            tracing::warn!(
                blog_id = %blog_id,
                owner_id = %blog.user_id,
                caller_id = %caller.user_id,
                "Rejected blog deletion by non-owner"
            );
            return Err(BlogError::NotOwner { resource: "blog" });
        }

        if !self.blog_repo.delete(&blog_id).await? {
            return Err(BlogError::BlogNotFound);
        }

        tracing::info!(blog_id = %blog_id, user_id = %caller.user_id, "Blog deleted");

        Ok(blog)
    }
}
