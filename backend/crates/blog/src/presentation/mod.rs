//! Presentation Layer
//!
//! GraphQL nodes, connections, loaders, DTOs, and resolvers.

pub mod connection;
pub mod dto;
pub mod handlers;
pub mod loader;
pub mod node;
pub mod scalar;

pub use handlers::{BlogMutation, BlogQuery};
pub use loader::TagLoader;
pub use node::{BlogNode, TagNode};
pub use scalar::TokyoDateTime;
