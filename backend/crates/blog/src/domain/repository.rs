//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use crate::domain::entity::{
    blog::{Blog, NewBlog},
    tag::{NewTag, Tag},
};
use crate::domain::value_object::{blog_id::BlogId, tag_id::TagId};
use crate::error::BlogResult;

/// Tag list filter
#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    /// Case-insensitive substring of the tag name
    pub name_icontains: Option<String>,
}

/// Blog list filter
#[derive(Debug, Clone, Default)]
pub struct BlogFilter {
    /// Case-insensitive substring of the owner's user name
    pub user_username_icontains: Option<String>,
}

/// Blog list order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BlogOrder {
    #[default]
    IdAsc,
    /// Oldest first, ties by id ascending
    CreatedAtAsc,
    /// Newest first, ties by id descending
    CreatedAtDesc,
}

/// Tag repository trait
#[trait_variant::make(TagRepository: Send)]
pub trait LocalTagRepository {
    /// Store a new tag, returning it with its assigned id
    async fn create(&self, tag: &NewTag) -> BlogResult<Tag>;

    async fn find_by_id(&self, tag_id: &TagId) -> BlogResult<Option<Tag>>;

    /// Tags for the given ids, ascending by id; missing ids are skipped
    async fn find_by_ids(&self, tag_ids: &[TagId]) -> BlogResult<Vec<Tag>>;

    /// Delete a tag, detaching it from every blog
    ///
    /// Returns `false` if the tag did not exist.
    async fn delete(&self, tag_id: &TagId) -> BlogResult<bool>;

    async fn count(&self, filter: &TagFilter) -> BlogResult<usize>;

    /// A window of tags, ascending by id
    async fn list(&self, filter: &TagFilter, offset: usize, limit: usize) -> BlogResult<Vec<Tag>>;
}

/// Blog repository trait
#[trait_variant::make(BlogRepository: Send)]
pub trait LocalBlogRepository {
    /// Store a new blog and its tag set atomically
    ///
    /// Fails with `BlogError::TagNotFound` if a tag disappeared meanwhile.
    async fn create(&self, blog: &NewBlog) -> BlogResult<Blog>;

    async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>>;

    /// Persist title, content and the full tag set atomically
    async fn update(&self, blog: &Blog) -> BlogResult<Blog>;

    /// Replace the tag set only
    async fn set_tags(&self, blog_id: &BlogId, tag_ids: &[TagId]) -> BlogResult<()>;

    /// Returns `false` if the blog did not exist
    async fn delete(&self, blog_id: &BlogId) -> BlogResult<bool>;

    async fn count(&self, filter: &BlogFilter) -> BlogResult<usize>;

    async fn list(
        &self,
        filter: &BlogFilter,
        order: BlogOrder,
        offset: usize,
        limit: usize,
    ) -> BlogResult<Vec<Blog>>;
}
