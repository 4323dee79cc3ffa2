//! Infrastructure Layer
//!
//! Database implementations of the repository traits.

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
pub use store::AuthStore;
