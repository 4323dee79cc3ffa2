//! Tag Entity

use auth::UserId;

use crate::domain::value_object::{tag_id::TagId, tag_name::TagName};

/// Label owned by the user who created it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub tag_id: TagId,
    /// Owner, fixed at creation
    pub user_id: UserId,
    pub name: TagName,
}

impl Tag {
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

/// A tag that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewTag {
    pub user_id: UserId,
    pub name: TagName,
}

impl NewTag {
    pub fn into_tag(self, tag_id: TagId) -> Tag {
        Tag {
            tag_id,
            user_id: self.user_id,
            name: self.name,
        }
    }
}
