//! PostgreSQL Repository Implementations

use std::collections::HashMap;

use auth::UserId;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::entity::{
    blog::{Blog, NewBlog},
    tag::{NewTag, Tag},
};
use crate::domain::repository::{
    BlogFilter, BlogOrder, BlogRepository, TagFilter, TagRepository,
};
use crate::domain::value_object::{
    blog_id::BlogId, blog_title::BlogTitle, tag_id::TagId, tag_name::TagName,
};
use crate::error::{BlogError, BlogResult};

const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL-backed tag and blog repository
#[derive(Clone)]
pub struct PgBlogRepository {
    pool: PgPool,
}

impl PgBlogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attached tag ids per blog, ascending
    async fn load_tag_ids(&self, blog_ids: &[i64]) -> BlogResult<HashMap<i64, Vec<TagId>>> {
        let rows = sqlx::query_as::<_, (i64, i64)>(
            r#"
            SELECT blog_id, tag_id
            FROM blog_tags
            WHERE blog_id = ANY($1)
            ORDER BY blog_id, tag_id
            "#,
        )
        .bind(blog_ids)
        .fetch_all(&self.pool)
        .await?;

        let mut map: HashMap<i64, Vec<TagId>> = HashMap::new();
        for (blog_id, tag_id) in rows {
            map.entry(blog_id).or_default().push(TagId::from_i64(tag_id));
        }
        Ok(map)
    }

    async fn attach_tags(&self, blog_rows: Vec<BlogRow>) -> BlogResult<Vec<Blog>> {
        let ids: Vec<i64> = blog_rows.iter().map(|r| r.id).collect();
        let mut tag_ids = self.load_tag_ids(&ids).await?;

        Ok(blog_rows
            .into_iter()
            .map(|row| {
                let tags = tag_ids.remove(&row.id).unwrap_or_default();
                row.into_blog(tags)
            })
            .collect())
    }
}

/// Replace a blog's tag set inside a transaction
async fn replace_tags(
    tx: &mut Transaction<'_, Postgres>,
    blog_id: i64,
    tag_ids: &[TagId],
) -> BlogResult<()> {
    sqlx::query("DELETE FROM blog_tags WHERE blog_id = $1")
        .bind(blog_id)
        .execute(&mut **tx)
        .await?;

    if tag_ids.is_empty() {
        return Ok(());
    }

    let ids: Vec<i64> = tag_ids.iter().map(|id| id.as_i64()).collect();
    sqlx::query(
        r#"
        INSERT INTO blog_tags (blog_id, tag_id)
        SELECT $1, unnest($2::bigint[])
        "#,
    )
    .bind(blog_id)
    .bind(&ids)
    .execute(&mut **tx)
    .await
    .map_err(tag_violation)?;

    Ok(())
}

/// A tag deleted between validation and write
fn tag_violation(err: sqlx::Error) -> BlogError {
    match &err {
        sqlx::Error::Database(db_err)
            if db_err.code().as_deref() == Some(FOREIGN_KEY_VIOLATION) =>
        {
            BlogError::TagNotFound
        }
        _ => BlogError::Database(err),
    }
}

// ============================================================================
// Tag Repository Implementation
// ============================================================================

impl TagRepository for PgBlogRepository {
    async fn create(&self, tag: &NewTag) -> BlogResult<Tag> {
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO tags (user_id, name) VALUES ($1, $2) RETURNING id",
        )
        .bind(tag.user_id.as_i64())
        .bind(tag.name.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(tag.clone().into_tag(TagId::from_i64(id)))
    }

    async fn find_by_id(&self, tag_id: &TagId) -> BlogResult<Option<Tag>> {
        let row = sqlx::query_as::<_, TagRow>("SELECT id, user_id, name FROM tags WHERE id = $1")
            .bind(tag_id.as_i64())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(TagRow::into_tag))
    }

    async fn find_by_ids(&self, tag_ids: &[TagId]) -> BlogResult<Vec<Tag>> {
        let ids: Vec<i64> = tag_ids.iter().map(|id| id.as_i64()).collect();

        let rows = sqlx::query_as::<_, TagRow>(
            "SELECT id, user_id, name FROM tags WHERE id = ANY($1) ORDER BY id",
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }

    async fn delete(&self, tag_id: &TagId) -> BlogResult<bool> {
        // blog_tags rows go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(tag_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &TagFilter) -> BlogResult<usize> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM tags
            WHERE ($1::text IS NULL OR strpos(lower(name), lower($1)) > 0)
            "#,
        )
        .bind(filter.name_icontains.as_deref())
        .fetch_one(&self.pool)
        .await?;

        to_usize(count)
    }

    async fn list(&self, filter: &TagFilter, offset: usize, limit: usize) -> BlogResult<Vec<Tag>> {
        let rows = sqlx::query_as::<_, TagRow>(
            r#"
            SELECT id, user_id, name
            FROM tags
            WHERE ($1::text IS NULL OR strpos(lower(name), lower($1)) > 0)
            ORDER BY id
            OFFSET $2
            LIMIT $3
            "#,
        )
        .bind(filter.name_icontains.as_deref())
        .bind(to_i64(offset)?)
        .bind(to_i64(limit)?)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TagRow::into_tag).collect())
    }
}

// ============================================================================
// Blog Repository Implementation
// ============================================================================

impl BlogRepository for PgBlogRepository {
    async fn create(&self, blog: &NewBlog) -> BlogResult<Blog> {
        let mut tx = self.pool.begin().await?;

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO blogs (user_id, title, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(blog.user_id.as_i64())
        .bind(blog.title.as_str())
        .bind(&blog.content)
        .bind(blog.created_at)
        .fetch_one(&mut *tx)
        .await?;

        replace_tags(&mut tx, id, &blog.tag_ids).await?;
        tx.commit().await?;

        // Re-read so the returned blog reflects what was stored
        BlogRepository::find_by_id(self, &BlogId::from_i64(id))
            .await?
            .ok_or(BlogError::BlogNotFound)
    }

    async fn find_by_id(&self, blog_id: &BlogId) -> BlogResult<Option<Blog>> {
        let row = sqlx::query_as::<_, BlogRow>(
            r#"
            SELECT id, user_id, title, content, created_at
            FROM blogs
            WHERE id = $1
            "#,
        )
        .bind(blog_id.as_i64())
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Ok(self.attach_tags(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn update(&self, blog: &Blog) -> BlogResult<Blog> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query("UPDATE blogs SET title = $2, content = $3 WHERE id = $1")
            .bind(blog.blog_id.as_i64())
            .bind(blog.title.as_str())
            .bind(&blog.content)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BlogError::BlogNotFound);
        }

        replace_tags(&mut tx, blog.blog_id.as_i64(), &blog.tag_ids).await?;
        tx.commit().await?;

        BlogRepository::find_by_id(self, &blog.blog_id)
            .await?
            .ok_or(BlogError::BlogNotFound)
    }

    async fn set_tags(&self, blog_id: &BlogId, tag_ids: &[TagId]) -> BlogResult<()> {
        let mut tx = self.pool.begin().await?;

        // Lock the row so a concurrent delete cannot interleave
        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM blogs WHERE id = $1 FOR UPDATE")
            .bind(blog_id.as_i64())
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(BlogError::BlogNotFound);
        }

        replace_tags(&mut tx, blog_id.as_i64(), tag_ids).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn delete(&self, blog_id: &BlogId) -> BlogResult<bool> {
        let result = sqlx::query("DELETE FROM blogs WHERE id = $1")
            .bind(blog_id.as_i64())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, filter: &BlogFilter) -> BlogResult<usize> {
        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM blogs b
            JOIN users u ON u.id = b.user_id
            WHERE ($1::text IS NULL OR strpos(lower(u.username), lower($1)) > 0)
            "#,
        )
        .bind(filter.user_username_icontains.as_deref())
        .fetch_one(&self.pool)
        .await?;

        to_usize(count)
    }

    async fn list(
        &self,
        filter: &BlogFilter,
        order: BlogOrder,
        offset: usize,
        limit: usize,
    ) -> BlogResult<Vec<Blog>> {
        let order_clause = match order {
            BlogOrder::IdAsc => "b.id ASC",
            BlogOrder::CreatedAtAsc => "b.created_at ASC, b.id ASC",
            BlogOrder::CreatedAtDesc => "b.created_at DESC, b.id DESC",
        };

        let sql = format!(
            r#"
            SELECT b.id, b.user_id, b.title, b.content, b.created_at
            FROM blogs b
            JOIN users u ON u.id = b.user_id
            WHERE ($1::text IS NULL OR strpos(lower(u.username), lower($1)) > 0)
            ORDER BY {order_clause}
            OFFSET $2
            LIMIT $3
            "#
        );

        let rows = sqlx::query_as::<_, BlogRow>(&sql)
            .bind(filter.user_username_icontains.as_deref())
            .bind(to_i64(offset)?)
            .bind(to_i64(limit)?)
            .fetch_all(&self.pool)
            .await?;

        self.attach_tags(rows).await
    }
}

fn to_i64(value: usize) -> BlogResult<i64> {
    i64::try_from(value).map_err(|_| BlogError::Validation("Pagination out of range".to_string()))
}

fn to_usize(value: i64) -> BlogResult<usize> {
    usize::try_from(value).map_err(|_| BlogError::Internal(format!("invalid row count {value}")))
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    user_id: i64,
    name: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            tag_id: TagId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            name: TagName::from_db(self.name),
        }
    }
}

#[derive(sqlx::FromRow)]
struct BlogRow {
    id: i64,
    user_id: i64,
    title: String,
    content: String,
    created_at: DateTime<Utc>,
}

impl BlogRow {
    fn into_blog(self, tag_ids: Vec<TagId>) -> Blog {
        Blog {
            blog_id: BlogId::from_i64(self.id),
            user_id: UserId::from_i64(self.user_id),
            title: BlogTitle::from_db(self.title),
            content: self.content,
            created_at: self.created_at,
            tag_ids,
        }
    }
}
