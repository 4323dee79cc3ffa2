//! In-Memory Repository Implementation
//!
//! Process-local storage used for local development and tests.
//! Shares the user table with `auth::MemoryAuthRepository` for the
//! owner user name filter.

use std::collections::BTreeMap;
use std::sync::Arc;

use auth::{MemoryAuthRepository, UserRepository};
use tokio::sync::RwLock;

use crate::domain::entity::{
    blog::{Blog, NewBlog},
    tag::{NewTag, Tag},
};
use crate::domain::repository::{
    BlogFilter, BlogOrder, BlogRepository, TagFilter, TagRepository,
};
use crate::domain::value_object::{blog_id::BlogId, tag_id::TagId};
use crate::error::{BlogError, BlogResult};

#[derive(Default)]
struct State {
    next_tag_id: i64,
    next_blog_id: i64,
    tags: BTreeMap<i64, Tag>,
    blogs: BTreeMap<i64, Blog>,
}

impl State {
    fn all_tags_exist(&self, tag_ids: &[TagId]) -> bool {
        tag_ids.iter().all(|id| self.tags.contains_key(&id.as_i64()))
    }
}

/// In-memory tag and blog repository
///
/// Cloning shares the underlying storage.
#[derive(Clone)]
pub struct MemoryBlogRepository {
    state: Arc<RwLock<State>>,
    users: MemoryAuthRepository,
}

impl MemoryBlogRepository {
    pub fn new(users: MemoryAuthRepository) -> Self {
        Self {
            state: Arc::default(),
            users,
        }
    }

    async fn matching_blogs(&self, filter: &BlogFilter) -> BlogResult<Vec<Blog>> {
        let owners = match &filter.user_username_icontains {
            Some(fragment) => Some(self.users.ids_by_user_name_contains(fragment).await?),
            None => None,
        };

        let state = self.state.read().await;
        Ok(state
            .blogs
            .values()
            .filter(|b| owners.as_ref().is_none_or(|ids| ids.contains(&b.user_id)))
            .cloned()
            .collect())
    }
}

fn tag_matches(tag: &Tag, filter: &TagFilter) -> bool {
    match &filter.name_icontains {
        Some(fragment) => tag
            .name
            .as_str()
            .to_lowercase()
            .contains(&fragment.to_lowercase()),
        None => true,
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for MemoryBlogRepository {
    async fn create(&self, tag: &NewTag) -> BlogResult<Tag> {
        let mut state = self.state.write().await;
        state.next_tag_id += 1;
        let id = state.next_tag_id;

        let created = tag.clone().into_tag(TagId::from_i64(id));
        state.tags.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, tag_id: &TagId) -> BlogResult<Option<Tag>> {
        Ok(self.state.read().await.tags.get(&tag_id.as_i64()).cloned())
    }

    async fn find_by_ids(&self, tag_ids: &[TagId]) -> BlogResult<Vec<Tag>> {
        let state = self.state.read().await;
        let mut found: Vec<Tag> = tag_ids
            .iter()
            .filter_map(|id| state.tags.get(&id.as_i64()).cloned())
            .collect();
        found.sort_by_key(|t| t.tag_id);
        found.dedup_by_key(|t| t.tag_id);
        Ok(found)
    }

    async fn delete(&self, tag_id: &TagId) -> BlogResult<bool> {
        let mut state = self.state.write().await;
        if state.tags.remove(&tag_id.as_i64()).is_none() {
            return Ok(false);
        }

        for blog in state.blogs.values_mut() {
            blog.tag_ids.retain(|id| id != tag_id);
        }
        Ok(true)
    }

    async fn count(&self, filter: &TagFilter) -> BlogResult<usize> {
        let state = self.state.read().await;
        Ok(state.tags.values().filter(|t| tag_matches(t, filter)).count())
    }

    async fn list(&self, filter: &TagFilter, offset: usize, limit: usize) -> BlogResult<Vec<Tag>> {
        let state = self.state.read().await;
        Ok(state
            .tags
            .values()
            .filter(|t| tag_matches(t, filter))
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

// ============================================================================
// Blog Repository Implementation
// ============================================================================

impl BlogRepository for MemoryBlogRepository {
    async fn create(&self, blog: &NewBlog) -> BlogResult<Blog> {
        let mut state = self.state.write().await;
        if !state.all_tags_exist(&blog.tag_ids) {
            return Err(BlogError::TagNotFound);
        }

        state.next_blog_id += 1;
        let id = state.next_blog_id;

        let created = blog.clone().into_blog(BlogId::from_i64(id));
        state.blogs.insert(id, created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>> {
        Ok(self.state.read().await.blogs.get(&blog_id.as_i64()).cloned())
    }

    async fn update(&self, blog: &Blog) -> BlogResult<Blog> {
        let mut state = self.state.write().await;
        if !state.all_tags_exist(&blog.tag_ids) {
            return Err(BlogError::TagNotFound);
        }

        let stored = state
            .blogs
            .get_mut(&blog.blog_id.as_i64())
            .ok_or(BlogError::BlogNotFound)?;

        // Owner and creation time are immutable
        stored.title = blog.title.clone();
        stored.content = blog.content.clone();
        stored.tag_ids = blog.tag_ids.clone();
        Ok(stored.clone())
    }

    async fn set_tags(&self, blog_id: &BlogId, tag_ids: &[TagId]) -> BlogResult<()> {
        let mut state = self.state.write().await;
        if !state.all_tags_exist(tag_ids) {
            return Err(BlogError::TagNotFound);
        }

        let stored = state
            .blogs
            .get_mut(&blog_id.as_i64())
            .ok_or(BlogError::BlogNotFound)?;
        stored.set_tags(tag_ids.to_vec());
        Ok(())
    }

    async fn delete(&self, blog_id: &BlogId) -> BlogResult<bool> {
        Ok(self
            .state
            .write()
            .await
            .blogs
            .remove(&blog_id.as_i64())
            .is_some())
    }

    async fn count(&self, filter: &BlogFilter) -> BlogResult<usize> {
        Ok(self.matching_blogs(filter).await?.len())
    }

    async fn list(
        &self,
        filter: &BlogFilter,
        order: BlogOrder,
        offset: usize,
        limit: usize,
    ) -> BlogResult<Vec<Blog>> {
        let mut blogs = self.matching_blogs(filter).await?;

        match order {
            // BTreeMap iteration is already id ascending
            BlogOrder::IdAsc => {}
            BlogOrder::CreatedAtAsc => {
                blogs.sort_by(|a, b| (a.created_at, a.blog_id).cmp(&(b.created_at, b.blog_id)));
            }
            BlogOrder::CreatedAtDesc => {
                blogs.sort_by(|a, b| (b.created_at, b.blog_id).cmp(&(a.created_at, a.blog_id)));
            }
        }

        Ok(blogs.into_iter().skip(offset).take(limit).collect())
    }
}
