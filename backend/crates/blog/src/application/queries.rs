//! Read-side queries
//!
//! No authentication; every row is visible.

use std::sync::Arc;

use crate::domain::entity::{blog::Blog, tag::Tag};
use crate::domain::repository::{BlogFilter, BlogOrder, BlogRepository, TagFilter, TagRepository};
use crate::domain::value_object::{blog_id::BlogId, tag_id::TagId};
use crate::error::{BlogError, BlogResult};

pub struct TagQueries<T>
where
    T: TagRepository,
{
    tag_repo: Arc<T>,
}

impl<T> TagQueries<T>
where
    T: TagRepository,
{
    pub fn new(tag_repo: Arc<T>) -> Self {
        Self { tag_repo }
    }

    pub async fn get(&self, tag_id: &TagId) -> BlogResult<Option<Tag>> {
        self.tag_repo.find_by_id(tag_id).await
    }

    pub async fn count(&self, filter: &TagFilter) -> BlogResult<usize> {
        self.tag_repo.count(filter).await
    }

    pub async fn list(&self, filter: &TagFilter, offset: usize, limit: usize) -> BlogResult<Vec<Tag>> {
        self.tag_repo.list(filter, offset, limit).await
    }
}

pub struct BlogQueries<B>
where
    B: BlogRepository,
{
    blog_repo: Arc<B>,
}

impl<B> BlogQueries<B>
where
    B: BlogRepository,
{
    pub fn new(blog_repo: Arc<B>) -> Self {
        Self { blog_repo }
    }

    pub async fn get(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>> {
        self.blog_repo.find_by_id(blog_id).await
    }

    pub async fn count(&self, filter: &BlogFilter) -> BlogResult<usize> {
        self.blog_repo.count(filter).await
    }

    pub async fn list(
        &self,
        filter: &BlogFilter,
        order: BlogOrder,
        offset: usize,
        limit: usize,
    ) -> BlogResult<Vec<Blog>> {
        self.blog_repo.list(filter, order, offset, limit).await
    }
}

/// Parse an `orderBy` argument
///
/// Comma-separated list of `created_at` / `-created_at`. The first key is
/// the primary sort; later keys are still validated. Empty input keeps the
/// default order.
pub fn parse_blog_order(order_by: &str) -> BlogResult<BlogOrder> {
    let mut order = None;
    for key in order_by.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        let parsed = match key {
            "created_at" => BlogOrder::CreatedAtAsc,
            "-created_at" => BlogOrder::CreatedAtDesc,
            other => {
                return Err(BlogError::Validation(format!(
                    "Select a valid choice. {other} is not one of the available choices"
                )));
            }
        };
        order.get_or_insert(parsed);
    }
    Ok(order.unwrap_or_default())
}
