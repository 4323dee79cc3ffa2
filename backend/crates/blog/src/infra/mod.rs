//! Infrastructure Layer
//!
//! Database implementations of the repository traits.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryBlogRepository;
pub use postgres::PgBlogRepository;
pub use store::BlogStore;
