//! Common ID Types
//!
//! Type-safe wrappers around storage-assigned numeric ids.

use std::fmt;
use std::marker::PhantomData;

use crate::global_id::{self, GlobalIdError};

/// Entity kind exposed through the global ID codec
pub trait NodeType {
    /// Type name embedded in global IDs (e.g. `"TagNode"`)
    const TYPE_NAME: &'static str;
}

/// Generic typed ID wrapper
///
/// Usage:
/// ```
/// use kernel::id::{Id, NodeType};
///
/// struct TagMarker;
/// impl NodeType for TagMarker {
///     const TYPE_NAME: &'static str = "TagNode";
/// }
/// type TagId = Id<TagMarker>;
///
/// let id = TagId::from_i64(1);
/// assert_eq!(TagId::from_global_id(&id.to_global_id()).unwrap(), id);
/// ```
pub struct Id<T> {
    value: i64,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Id<T> {
    /// Wrap a storage id
    pub const fn from_i64(value: i64) -> Self {
        Self {
            value,
            _marker: PhantomData,
        }
    }

    /// Get the underlying storage id
    pub const fn as_i64(&self) -> i64 {
        self.value
    }
}

impl<T: NodeType> Id<T> {
    /// Encode as an opaque global ID
    pub fn to_global_id(&self) -> String {
        global_id::encode(T::TYPE_NAME, self.value)
    }

    /// Decode an opaque global ID, rejecting IDs of other node types
    pub fn from_global_id(value: &str) -> Result<Self, GlobalIdError> {
        global_id::decode_as(value, T::TYPE_NAME).map(Self::from_i64)
    }
}

// Manual impls: derives would require `T: Clone` etc. on the marker.
impl<T> Clone for Id<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> PartialEq for Id<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.value.cmp(&other.value)
    }
}

impl<T> std::hash::Hash for Id<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<T> fmt::Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.value)
    }
}

impl<T> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<T> From<i64> for Id<T> {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl<T> From<Id<T>> for i64 {
    fn from(id: Id<T>) -> Self {
        id.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Tag;
    impl NodeType for Tag {
        const TYPE_NAME: &'static str = "TagNode";
    }

    struct Blog;
    impl NodeType for Blog {
        const TYPE_NAME: &'static str = "BlogNode";
    }

    #[test]
    fn test_id_type_safety() {
        let tag_id: Id<Tag> = Id::from_i64(1);
        let blog_id: Id<Blog> = Id::from_i64(1);

        // Same storage value, different types
        assert_eq!(tag_id.as_i64(), blog_id.as_i64());
        assert_ne!(tag_id.to_global_id(), blog_id.to_global_id());
    }

    #[test]
    fn test_global_id_rejects_other_type() {
        let tag_id: Id<Tag> = Id::from_i64(5);
        let err = Id::<Blog>::from_global_id(&tag_id.to_global_id()).unwrap_err();
        assert!(matches!(err, GlobalIdError::TypeMismatch { .. }));
    }

    #[test]
    fn test_ordering_follows_value() {
        let mut ids: Vec<Id<Tag>> = vec![3.into(), 1.into(), 2.into()];
        ids.sort();
        assert_eq!(ids.iter().map(Id::as_i64).collect::<Vec<_>>(), vec![1, 2, 3]);
    }
}
