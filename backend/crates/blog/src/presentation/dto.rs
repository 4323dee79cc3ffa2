//! GraphQL input and payload types
//!
//! Every mutation takes one `input` object and echoes `clientMutationId`.

use async_graphql::{ID, InputObject, SimpleObject};
use kernel::id::{Id, NodeType};

use crate::error::BlogResult;
use crate::presentation::node::{BlogNode, TagNode};

/// Decode a global ID of a specific node type
pub fn decode_id<M: NodeType>(id: &ID) -> BlogResult<Id<M>> {
    Ok(Id::<M>::from_global_id(id.as_str())?)
}

/// Decode an optional list of global IDs
pub fn decode_ids<M: NodeType>(ids: Option<Vec<ID>>) -> BlogResult<Option<Vec<Id<M>>>> {
    ids.map(|ids| ids.iter().map(decode_id::<M>).collect())
        .transpose()
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, InputObject)]
pub struct CreateTagInput {
    pub name: String,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct CreateTagPayload {
    pub tag: Option<TagNode>,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct DeleteTagInput {
    pub id: ID,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct DeleteTagPayload {
    /// The tag as it was before deletion
    pub tag: Option<TagNode>,
    pub client_mutation_id: Option<String>,
}

// ============================================================================
// Blogs
// ============================================================================

#[derive(Debug, InputObject)]
pub struct CreateBlogInput {
    pub title: String,
    pub content: String,
    pub tags: Option<Vec<ID>>,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct CreateBlogPayload {
    pub blog: Option<BlogNode>,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct UpdateBlogInput {
    pub id: ID,
    pub tags: Option<Vec<ID>>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct UpdateBlogPayload {
    pub blog: Option<BlogNode>,
    pub client_mutation_id: Option<String>,
}

#[derive(Debug, InputObject)]
pub struct DeleteBlogInput {
    pub id: ID,
    pub client_mutation_id: Option<String>,
}

#[derive(SimpleObject)]
pub struct DeleteBlogPayload {
    /// The blog as it was before deletion
    pub blog: Option<BlogNode>,
    pub client_mutation_id: Option<String>,
}
