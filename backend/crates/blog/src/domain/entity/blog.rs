//! Blog Entity

use auth::UserId;
use chrono::{DateTime, Utc};

use crate::domain::value_object::{blog_id::BlogId, blog_title::BlogTitle, tag_id::TagId};

/// Blog post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blog {
    pub blog_id: BlogId,
    /// Owner, fixed at creation
    pub user_id: UserId,
    pub title: BlogTitle,
    pub content: String,
    pub created_at: DateTime<Utc>,
    /// Attached tags, ascending by id
    pub tag_ids: Vec<TagId>,
}

impl Blog {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Replace the full tag set
    pub fn set_tags(&mut self, tag_ids: Vec<TagId>) {
        self.tag_ids = normalize_tag_ids(tag_ids);
    }
}

/// A blog that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewBlog {
    pub user_id: UserId,
    pub title: BlogTitle,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub tag_ids: Vec<TagId>,
}

impl NewBlog {
    pub fn new(user_id: UserId, title: BlogTitle, content: String, tag_ids: Vec<TagId>) -> Self {
        Self {
            user_id,
            title,
            content,
            created_at: Utc::now(),
            tag_ids: normalize_tag_ids(tag_ids),
        }
    }

    pub fn into_blog(self, blog_id: BlogId) -> Blog {
        Blog {
            blog_id,
            user_id: self.user_id,
            title: self.title,
            content: self.content,
            created_at: self.created_at,
            tag_ids: self.tag_ids,
        }
    }
}

/// Sort and dedup: the tag relation is a set
pub fn normalize_tag_ids(mut tag_ids: Vec<TagId>) -> Vec<TagId> {
    tag_ids.sort();
    tag_ids.dedup();
    tag_ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tags_is_a_set() {
        let mut blog = NewBlog::new(
            UserId::from_i64(1),
            BlogTitle::new("T").unwrap(),
            "C".to_string(),
            vec![],
        )
        .into_blog(BlogId::from_i64(1));

        blog.set_tags(vec![TagId::from_i64(3), TagId::from_i64(1), TagId::from_i64(3)]);
        assert_eq!(blog.tag_ids, vec![TagId::from_i64(1), TagId::from_i64(3)]);

        blog.set_tags(vec![]);
        assert!(blog.tag_ids.is_empty());
    }
}
