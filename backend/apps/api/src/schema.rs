//! Merged GraphQL schema

use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{
    Context, EmptySubscription, ErrorExtensions, ID, Interface, MergedObject, Object, Result,
    Schema,
};
use auth::{
    AuthConfig, AuthMutation, AuthQuery, AuthStore, UserId, UserLoader, UserNode, UserRepository,
};
use blog::application::{BlogQueries, TagQueries};
use blog::{BlogId, BlogMutation, BlogNode, BlogQuery, BlogStore, TagId, TagLoader, TagNode};
use kernel::error::app_error::AppError;
use kernel::global_id;

#[derive(MergedObject, Default)]
pub struct Query(AuthQuery, BlogQuery, NodeQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(AuthMutation, BlogMutation);

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with its storage and token settings attached
///
/// The loaders only batch; they keep no cache between requests.
pub fn build_schema(
    auth_store: Arc<AuthStore>,
    auth_config: Arc<AuthConfig>,
    blog_store: Arc<BlogStore>,
) -> AppSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(DataLoader::new(UserLoader::new(auth_store.clone()), tokio::spawn))
        .data(DataLoader::new(TagLoader::new(blog_store.clone()), tokio::spawn))
        .data(auth_store)
        .data(auth_config)
        .data(blog_store)
        .finish()
}

// ============================================================================
// Relay Node
// ============================================================================

/// An object with an ID
#[derive(Interface)]
#[graphql(field(name = "id", ty = "ID", desc = "The ID of the object"))]
pub enum Node {
    User(UserNode),
    Tag(TagNode),
    Blog(BlogNode),
}

#[derive(Default)]
pub struct NodeQuery;

#[Object]
impl NodeQuery {
    /// Fetch any object by its global ID
    async fn node(&self, ctx: &Context<'_>, id: ID) -> Result<Option<Node>> {
        let (type_name, local_id) =
            global_id::decode(&id).map_err(|e| AppError::from(e).extend())?;

        match type_name.as_str() {
            "UserNode" => {
                let store = ctx.data::<Arc<AuthStore>>()?;
                let user = store
                    .find_by_id(&UserId::from_i64(local_id))
                    .await
                    .map_err(|e| e.extend())?;
                Ok(user.map(|u| Node::User(UserNode(u))))
            }
            "TagNode" => {
                let store = ctx.data::<Arc<BlogStore>>()?;
                let tag = TagQueries::new(store.clone())
                    .get(&TagId::from_i64(local_id))
                    .await
                    .map_err(|e| e.extend())?;
                Ok(tag.map(|t| Node::Tag(TagNode(t))))
            }
            "BlogNode" => {
                let store = ctx.data::<Arc<BlogStore>>()?;
                let blog = BlogQueries::new(store.clone())
                    .get(&BlogId::from_i64(local_id))
                    .await
                    .map_err(|e| e.extend())?;
                Ok(blog.map(|b| Node::Blog(BlogNode(b))))
            }
            other => Err(AppError::bad_request(format!("Unknown node type: {other}")).extend()),
        }
    }
}
