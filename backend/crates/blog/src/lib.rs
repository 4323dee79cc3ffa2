//! Blog Backend Module
//!
//! Tags and blog posts owned by users.
//!
//! Clean Architecture structure:
//! - `domain/` - Tag and Blog entities, value objects, repository traits
//! - `application/` - Create/delete tags, create/update/delete blogs, read queries
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - `TagNode`, `BlogNode`, connections, resolvers
//!
//! Every mutation runs behind `auth::login_required`, and update/delete
//! check that the caller owns the row.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use domain::entity::{blog::Blog, tag::Tag};
pub use domain::repository::{BlogRepository, TagRepository};
pub use domain::value_object::{blog_id::BlogId, tag_id::TagId};
pub use error::{BlogError, BlogResult};
pub use infra::{memory::MemoryBlogRepository, postgres::PgBlogRepository, store::BlogStore};
pub use presentation::handlers::{BlogMutation, BlogQuery};
pub use presentation::loader::TagLoader;
pub use presentation::node::{BlogNode, TagNode};
