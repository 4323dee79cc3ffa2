//! Storage backend selection

use crate::domain::entity::{
    blog::{Blog, NewBlog},
    tag::{NewTag, Tag},
};
use crate::domain::repository::{
    BlogFilter, BlogOrder, BlogRepository, TagFilter, TagRepository,
};
use crate::domain::value_object::{blog_id::BlogId, tag_id::TagId};
use crate::error::BlogResult;
use crate::infra::{memory::MemoryBlogRepository, postgres::PgBlogRepository};

/// Tag and blog storage, PostgreSQL or in-memory
#[derive(Clone)]
pub enum BlogStore {
    Postgres(PgBlogRepository),
    Memory(MemoryBlogRepository),
}

impl From<PgBlogRepository> for BlogStore {
    fn from(repo: PgBlogRepository) -> Self {
        Self::Postgres(repo)
    }
}

impl From<MemoryBlogRepository> for BlogStore {
    fn from(repo: MemoryBlogRepository) -> Self {
        Self::Memory(repo)
    }
}

impl TagRepository for BlogStore {
    async fn create(&self, tag: &NewTag) -> BlogResult<Tag> {
        match self {
            Self::Postgres(r) => TagRepository::create(r, tag).await,
            Self::Memory(r) => TagRepository::create(r, tag).await,
        }
    }

    async fn find_by_id(&self, tag_id: &TagId) -> BlogResult<Option<Tag>> {
        match self {
            Self::Postgres(r) => TagRepository::find_by_id(r, tag_id).await,
            Self::Memory(r) => TagRepository::find_by_id(r, tag_id).await,
        }
    }

    async fn find_by_ids(&self, tag_ids: &[TagId]) -> BlogResult<Vec<Tag>> {
        match self {
            Self::Postgres(r) => r.find_by_ids(tag_ids).await,
            Self::Memory(r) => r.find_by_ids(tag_ids).await,
        }
    }

    async fn delete(&self, tag_id: &TagId) -> BlogResult<bool> {
        match self {
            Self::Postgres(r) => TagRepository::delete(r, tag_id).await,
            Self::Memory(r) => TagRepository::delete(r, tag_id).await,
        }
    }

    async fn count(&self, filter: &TagFilter) -> BlogResult<usize> {
        match self {
            Self::Postgres(r) => TagRepository::count(r, filter).await,
            Self::Memory(r) => TagRepository::count(r, filter).await,
        }
    }

    async fn list(&self, filter: &TagFilter, offset: usize, limit: usize) -> BlogResult<Vec<Tag>> {
        match self {
            Self::Postgres(r) => TagRepository::list(r, filter, offset, limit).await,
            Self::Memory(r) => TagRepository::list(r, filter, offset, limit).await,
        }
    }
}

impl BlogRepository for BlogStore {
    async fn create(&self, blog: &NewBlog) -> BlogResult<Blog> {
        match self {
            Self::Postgres(r) => BlogRepository::create(r, blog).await,
            Self::Memory(r) => BlogRepository::create(r, blog).await,
        }
    }

    async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>> {
        match self {
            Self::Postgres(r) => BlogRepository::find_by_id(r, blog_id).await,
            Self::Memory(r) => BlogRepository::find_by_id(r, blog_id).await,
        }
    }

    async fn update(&self, blog: &Blog) -> BlogResult<Blog> {
        match self {
            Self::Postgres(r) => r.update(blog).await,
            Self::Memory(r) => r.update(blog).await,
        }
    }

    async fn set_tags(&self, blog_id: &BlogId, tag_ids: &[TagId]) -> BlogResult<()> {
        match self {
            Self::Postgres(r) => r.set_tags(blog_id, tag_ids).await,
            Self::Memory(r) => r.set_tags(blog_id, tag_ids).await,
        }
    }

    async fn delete(&self, blog_id: &BlogId) -> BlogResult<bool> {
        match self {
            Self::Postgres(r) => BlogRepository::delete(r, blog_id).await,
            Self::Memory(r) => BlogRepository::delete(r, blog_id).await,
        }
    }

    async fn count(&self, filter: &BlogFilter) -> BlogResult<usize> {
        match self {
            Self::Postgres(r) => BlogRepository::count(r, filter).await,
            Self::Memory(r) => BlogRepository::count(r, filter).await,
        }
    }

    async fn list(
        &self,
        filter: &BlogFilter,
        order: BlogOrder,
        offset: usize,
        limit: usize,
    ) -> BlogResult<Vec<Blog>> {
        match self {
            Self::Postgres(r) => BlogRepository::list(r, filter, order, offset, limit).await,
            Self::Memory(r) => BlogRepository::list(r, filter, order, offset, limit).await,
        }
    }
}
