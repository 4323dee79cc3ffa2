//! Presentation Layer
//!
//! GraphQL node, resolvers, DTOs, loaders, viewer resolution, and guard.

pub mod dto;
pub mod guard;
pub mod handlers;
pub mod loader;
pub mod middleware;
pub mod node;

pub use guard::{Viewer, login_required};
pub use handlers::{AuthMutation, AuthQuery};
pub use loader::UserLoader;
pub use middleware::resolve_viewer;
pub use node::UserNode;
