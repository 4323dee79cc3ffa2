//! `TagNode` and `BlogNode` projections

use async_graphql::connection::Connection;
use async_graphql::dataloader::DataLoader;
use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use auth::{AuthError, UserId, UserLoader, UserNode};

use crate::domain::entity::{blog::Blog, tag::Tag};
use crate::error::BlogResult;
use crate::presentation::connection::{OffsetCursor, PageArgs};
use crate::presentation::loader::TagLoader;
use crate::presentation::scalar::TokyoDateTime;

#[derive(Debug, Clone)]
pub struct TagNode(pub Tag);

#[Object(name = "TagNode")]
impl TagNode {
    /// The ID of the object
    pub async fn id(&self) -> ID {
        ID(self.0.tag_id.to_global_id())
    }

    async fn name(&self) -> &str {
        self.0.name.as_str()
    }

    /// Owner
    async fn user(&self, ctx: &Context<'_>) -> Result<UserNode> {
        load_owner(ctx, self.0.user_id).await
    }
}

#[derive(Debug, Clone)]
pub struct BlogNode(pub Blog);

#[Object(name = "BlogNode")]
impl BlogNode {
    /// The ID of the object
    pub async fn id(&self) -> ID {
        ID(self.0.blog_id.to_global_id())
    }

    async fn title(&self) -> &str {
        self.0.title.as_str()
    }

    async fn content(&self) -> &str {
        &self.0.content
    }

    async fn created_at(&self) -> TokyoDateTime {
        TokyoDateTime(self.0.created_at)
    }

    /// Owner
    async fn user(&self, ctx: &Context<'_>) -> Result<UserNode> {
        load_owner(ctx, self.0.user_id).await
    }

    async fn tags(
        &self,
        ctx: &Context<'_>,
        offset: Option<i32>,
        before: Option<String>,
        after: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        #[graphql(name = "name_Icontains")] name_icontains: Option<String>,
    ) -> Result<Connection<OffsetCursor, TagNode>> {
        let found = ctx
            .data::<DataLoader<TagLoader>>()?
            .load_many(self.0.tag_ids.iter().copied())
            .await?;

        let mut tags: Vec<Tag> = found.into_values().collect();
        tags.sort_by_key(|t| t.tag_id);

        let page = PageArgs {
            offset,
            before,
            after,
            first,
            last,
        };

        tag_page(tags, page, name_icontains).map_err(|e| e.extend())
    }
}

fn tag_page(
    mut tags: Vec<Tag>,
    page: PageArgs,
    name_icontains: Option<String>,
) -> BlogResult<Connection<OffsetCursor, TagNode>> {
    if let Some(fragment) = name_icontains {
        let needle = fragment.to_lowercase();
        tags.retain(|t| t.name.as_str().to_lowercase().contains(&needle));
    }

    let window = page.window(tags.len())?;
    let nodes = tags
        .into_iter()
        .skip(window.start)
        .take(window.len())
        .map(TagNode)
        .collect();

    Ok(window.into_connection(nodes))
}

/// Owner lookups go through the shared `UserLoader` so a page of nodes
/// costs one user query
async fn load_owner(ctx: &Context<'_>, user_id: UserId) -> Result<UserNode> {
    let user = ctx
        .data::<DataLoader<UserLoader>>()?
        .load_one(user_id)
        .await?
        .ok_or_else(|| AuthError::UserNotFound.extend())?;

    Ok(UserNode(user))
}
