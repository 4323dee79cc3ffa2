//! GraphQL resolvers for tags and blogs

use std::sync::Arc;

use async_graphql::connection::Connection;
use async_graphql::{Context, ErrorExtensions, ID, Object, Result};
use auth::login_required;

use crate::application::queries::parse_blog_order;
use crate::application::{
    BlogQueries, CreateBlogUseCase, CreateTagUseCase, DeleteBlogUseCase, DeleteTagUseCase,
    TagQueries, UpdateBlogUseCase,
};
use crate::application::{create_blog, update_blog};
use crate::domain::repository::{BlogFilter, TagFilter};
use crate::domain::value_object::{blog_id::BlogMarker, tag_id::TagMarker};
use crate::error::BlogResult;
use crate::infra::store::BlogStore;
use crate::presentation::connection::{OffsetCursor, PageArgs};
use crate::presentation::dto::{
    CreateBlogInput, CreateBlogPayload, CreateTagInput, CreateTagPayload, DeleteBlogInput,
    DeleteBlogPayload, DeleteTagInput, DeleteTagPayload, UpdateBlogInput, UpdateBlogPayload,
    decode_id, decode_ids,
};
use crate::presentation::node::{BlogNode, TagNode};

// ============================================================================
// Queries
// ============================================================================

#[derive(Default)]
pub struct BlogQuery;

#[Object]
impl BlogQuery {
    /// Look up a tag by global ID
    async fn tag(&self, ctx: &Context<'_>, id: ID) -> Result<Option<TagNode>> {
        let store = ctx.data::<Arc<BlogStore>>()?;
        find_tag(store, &id).await.map_err(|e| e.extend())
    }

    /// Look up a blog by global ID
    async fn blog(&self, ctx: &Context<'_>, id: ID) -> Result<Option<BlogNode>> {
        let store = ctx.data::<Arc<BlogStore>>()?;
        find_blog(store, &id).await.map_err(|e| e.extend())
    }

    async fn all_tags(
        &self,
        ctx: &Context<'_>,
        offset: Option<i32>,
        before: Option<String>,
        after: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        #[graphql(name = "name_Icontains")] name_icontains: Option<String>,
    ) -> Result<Connection<OffsetCursor, TagNode>> {
        let store = ctx.data::<Arc<BlogStore>>()?;
        let page = PageArgs {
            offset,
            before,
            after,
            first,
            last,
        };

        tag_page(store, TagFilter { name_icontains }, page)
            .await
            .map_err(|e| e.extend())
    }

    async fn all_blogs(
        &self,
        ctx: &Context<'_>,
        offset: Option<i32>,
        before: Option<String>,
        after: Option<String>,
        first: Option<i32>,
        last: Option<i32>,
        #[graphql(name = "user_Username_Icontains")] user_username_icontains: Option<String>,
        #[graphql(desc = "`created_at` or `-created_at`")] order_by: Option<String>,
    ) -> Result<Connection<OffsetCursor, BlogNode>> {
        let store = ctx.data::<Arc<BlogStore>>()?;
        let page = PageArgs {
            offset,
            before,
            after,
            first,
            last,
        };
        let filter = BlogFilter {
            user_username_icontains,
        };

        blog_page(store, filter, order_by.as_deref(), page)
            .await
            .map_err(|e| e.extend())
    }
}

async fn find_tag(store: &Arc<BlogStore>, id: &ID) -> BlogResult<Option<TagNode>> {
    let tag_id = decode_id::<TagMarker>(id)?;
    let tag = TagQueries::new(store.clone()).get(&tag_id).await?;
    Ok(tag.map(TagNode))
}

async fn find_blog(store: &Arc<BlogStore>, id: &ID) -> BlogResult<Option<BlogNode>> {
    let blog_id = decode_id::<BlogMarker>(id)?;
    let blog = BlogQueries::new(store.clone()).get(&blog_id).await?;
    Ok(blog.map(BlogNode))
}

async fn tag_page(
    store: &Arc<BlogStore>,
    filter: TagFilter,
    page: PageArgs,
) -> BlogResult<Connection<OffsetCursor, TagNode>> {
    let queries = TagQueries::new(store.clone());

    let total = queries.count(&filter).await?;
    let window = page.window(total)?;
    let tags = if window.is_empty() {
        Vec::new()
    } else {
        queries.list(&filter, window.start, window.len()).await?
    };

    Ok(window.into_connection(tags.into_iter().map(TagNode).collect()))
}

async fn blog_page(
    store: &Arc<BlogStore>,
    filter: BlogFilter,
    order_by: Option<&str>,
    page: PageArgs,
) -> BlogResult<Connection<OffsetCursor, BlogNode>> {
    let order = parse_blog_order(order_by.unwrap_or_default())?;
    let queries = BlogQueries::new(store.clone());

    let total = queries.count(&filter).await?;
    let window = page.window(total)?;
    let blogs = if window.is_empty() {
        Vec::new()
    } else {
        queries
            .list(&filter, order, window.start, window.len())
            .await?
    };

    Ok(window.into_connection(blogs.into_iter().map(BlogNode).collect()))
}

// ============================================================================
// Mutations
// ============================================================================

#[derive(Default)]
pub struct BlogMutation;

#[Object]
impl BlogMutation {
    async fn create_tag(
        &self,
        ctx: &Context<'_>,
        input: CreateTagInput,
    ) -> Result<CreateTagPayload> {
        let user = login_required(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<Arc<BlogStore>>()?;

        let tag = CreateTagUseCase::new(store.clone())
            .execute(user, input.name)
            .await
            .map_err(|e| e.extend())?;

        Ok(CreateTagPayload {
            tag: Some(TagNode(tag)),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn delete_tag(
        &self,
        ctx: &Context<'_>,
        input: DeleteTagInput,
    ) -> Result<DeleteTagPayload> {
        let user = login_required(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<Arc<BlogStore>>()?;

        let tag_id = decode_id::<TagMarker>(&input.id).map_err(|e| e.extend())?;
        let tag = DeleteTagUseCase::new(store.clone())
            .execute(user, tag_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(DeleteTagPayload {
            tag: Some(TagNode(tag)),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn create_blog(
        &self,
        ctx: &Context<'_>,
        input: CreateBlogInput,
    ) -> Result<CreateBlogPayload> {
        let user = login_required(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<Arc<BlogStore>>()?;

        let tag_ids = decode_ids::<TagMarker>(input.tags).map_err(|e| e.extend())?;
        let blog = CreateBlogUseCase::new(store.clone(), store.clone())
            .execute(
                user,
                create_blog::CreateBlogInput {
                    title: input.title,
                    content: input.content,
                    tag_ids,
                },
            )
            .await
            .map_err(|e| e.extend())?;

        Ok(CreateBlogPayload {
            blog: Some(BlogNode(blog)),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn update_blog(
        &self,
        ctx: &Context<'_>,
        input: UpdateBlogInput,
    ) -> Result<UpdateBlogPayload> {
        let user = login_required(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<Arc<BlogStore>>()?;

        let blog_id = decode_id::<BlogMarker>(&input.id).map_err(|e| e.extend())?;
        let tag_ids = decode_ids::<TagMarker>(input.tags).map_err(|e| e.extend())?;
        let blog = UpdateBlogUseCase::new(store.clone(), store.clone())
            .execute(
                user,
                blog_id,
                update_blog::UpdateBlogInput {
                    title: input.title,
                    content: input.content,
                    tag_ids,
                },
            )
            .await
            .map_err(|e| e.extend())?;

        Ok(UpdateBlogPayload {
            blog: Some(BlogNode(blog)),
            client_mutation_id: input.client_mutation_id,
        })
    }

    async fn delete_blog(
        &self,
        ctx: &Context<'_>,
        input: DeleteBlogInput,
    ) -> Result<DeleteBlogPayload> {
        let user = login_required(ctx).map_err(|e| e.extend())?;
        let store = ctx.data::<Arc<BlogStore>>()?;

        let blog_id = decode_id::<BlogMarker>(&input.id).map_err(|e| e.extend())?;
        let blog = DeleteBlogUseCase::new(store.clone())
            .execute(user, blog_id)
            .await
            .map_err(|e| e.extend())?;

        Ok(DeleteBlogPayload {
            blog: Some(BlogNode(blog)),
            client_mutation_id: input.client_mutation_id,
        })
    }
}
