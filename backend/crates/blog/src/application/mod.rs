//! Application Layer
//!
//! Use cases and read queries.

pub mod create_blog;
pub mod create_tag;
pub mod delete_blog;
pub mod delete_tag;
pub mod queries;
pub mod update_blog;

// Re-exports
pub use create_blog::{CreateBlogInput, CreateBlogUseCase};
pub use create_tag::CreateTagUseCase;
pub use delete_blog::DeleteBlogUseCase;
pub use delete_tag::DeleteTagUseCase;
pub use queries::{BlogQueries, TagQueries};
pub use update_blog::{UpdateBlogInput, UpdateBlogUseCase};

use crate::domain::entity::blog::normalize_tag_ids;
use crate::domain::repository::TagRepository;
use crate::domain::value_object::tag_id::TagId;
use crate::error::{BlogError, BlogResult};

/// Check every requested tag exists before anything is written
///
/// Tags of any owner may be attached.
pub(crate) async fn resolve_tags<T: TagRepository>(
    tag_repo: &T,
    tag_ids: Vec<TagId>,
) -> BlogResult<Vec<TagId>> {
    let tag_ids = normalize_tag_ids(tag_ids);
    if tag_ids.is_empty() {
        return Ok(tag_ids);
    }

    let found = tag_repo.find_by_ids(&tag_ids).await?;
    if found.len() != tag_ids.len() {
        return Err(BlogError::TagNotFound);
    }

    Ok(tag_ids)
}
