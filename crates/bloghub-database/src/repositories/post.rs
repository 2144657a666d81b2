//! Post repository implementation.
//!
//! Posts participate in a many-to-many relation to tags through the
//! `rel_post__tag` association table. Association rows are written and
//! removed here, in the same transaction as the post row, so no dangling
//! links survive a delete.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use bloghub_core::error::{AppError, ErrorKind};
use bloghub_core::result::AppResult;
use bloghub_core::traits::Repository;
use bloghub_core::types::pagination::{PageRequest, PageResponse};
use bloghub_core::types::sorting::SortField;
use bloghub_entity::post::{NewPost, Post, PostWithTags};
use bloghub_entity::tag::Tag;

use super::order_clause;

/// Columns a post listing may be sorted by.
const SORTABLE_COLUMNS: &[&str] = &["id", "title", "date", "blog_id"];

/// Repository for post CRUD, parent-key queries, and tag associations.
#[derive(Debug, Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    /// Create a new post repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a post by ID and hydrate its tags.
    ///
    /// The row lookup and the tag lookup are independent reads and run
    /// concurrently; both complete before the hydrated post is returned.
    pub async fn find_by_id_with_tags(&self, id: i64) -> AppResult<Option<PostWithTags>> {
        let (post, tags) = futures::try_join!(self.find_by_id(id), self.tags_of(id))?;
        Ok(post.map(|post| PostWithTags { post, tags }))
    }

    /// Page through posts with their tags hydrated.
    ///
    /// One query fetches the page's base rows and a single follow-up query
    /// fetches the tag links for every post on the page, keyed by the set
    /// of ids, so the query count is constant regardless of page size.
    pub async fn find_page_with_tags(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<PostWithTags>> {
        let base = self.find_all(page, sort).await?;
        let ids: Vec<i64> = base.items.iter().map(|p| p.id).collect();
        let mut by_post = self.tags_for_posts(&ids).await?;

        Ok(base.map(|post| {
            let tags = by_post.remove(&post.id).unwrap_or_default();
            PostWithTags { post, tags }
        }))
    }

    /// Find all posts belonging to a blog.
    pub async fn find_by_blog(&self, blog_id: i64) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM post WHERE blog_id = $1 ORDER BY id ASC")
            .bind(blog_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list posts by blog", e)
            })
    }

    /// Find all posts without an owning blog.
    pub async fn find_all_where_blog_is_null(&self) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM post WHERE blog_id IS NULL ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list orphaned posts", e)
            })
    }

    /// Find all posts carrying a given tag, through the association table.
    pub async fn find_by_tag(&self, tag_id: i64) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>(
            "SELECT p.* FROM post p \
             JOIN rel_post__tag r ON p.id = r.post_id \
             WHERE r.tag_id = $1 ORDER BY p.id ASC",
        )
        .bind(tag_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts by tag", e))
    }

    /// Load the tags linked to a single post.
    pub async fn tags_of(&self, post_id: i64) -> AppResult<Vec<Tag>> {
        sqlx::query_as::<_, Tag>(
            "SELECT t.* FROM tag t \
             JOIN rel_post__tag r ON t.id = r.tag_id \
             WHERE r.post_id = $1 ORDER BY t.id ASC",
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tags", e))
    }

    /// Replace the full tag association set of a post.
    pub async fn replace_tags(&self, post_id: i64, tag_ids: &[i64]) -> AppResult<()> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM rel_post__tag WHERE post_id = $1")
            .bind(post_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear tag links", e)
            })?;

        if !tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO rel_post__tag (post_id, tag_id) \
                 SELECT $1, unnest($2::bigint[])",
            )
            .bind(post_id)
            .bind(tag_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert tag links", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    /// Batched tag lookup for a set of post ids, grouped by post.
    async fn tags_for_posts(&self, post_ids: &[i64]) -> AppResult<HashMap<i64, Vec<Tag>>> {
        if post_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let links = sqlx::query_as::<_, (i64, i64, String)>(
            "SELECT r.post_id, t.id, t.name FROM rel_post__tag r \
             JOIN tag t ON t.id = r.tag_id \
             WHERE r.post_id = ANY($1) ORDER BY r.post_id, t.id ASC",
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load tag links", e))?;

        let mut grouped: HashMap<i64, Vec<Tag>> = HashMap::new();
        for (post_id, tag_id, name) in links {
            grouped
                .entry(post_id)
                .or_default()
                .push(Tag { id: tag_id, name });
        }
        Ok(grouped)
    }
}

#[async_trait]
impl Repository<Post, NewPost> for PostRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM post WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find post", e))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Post>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;

        let order = order_clause(sort, SORTABLE_COLUMNS)?;
        let posts = sqlx::query_as::<_, Post>(&format!(
            "SELECT * FROM post ORDER BY {order} LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list posts", e))?;

        Ok(PageResponse::new(
            posts,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Insert the post row and its tag links in one transaction.
    async fn create(&self, data: &NewPost) -> AppResult<Post> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let post = sqlx::query_as::<_, Post>(
            "INSERT INTO post (title, content, date, blog_id) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.title)
        .bind(&data.content)
        .bind(data.date)
        .bind(data.blog_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create post", e))?;

        if !data.tag_ids.is_empty() {
            sqlx::query(
                "INSERT INTO rel_post__tag (post_id, tag_id) \
                 SELECT $1, unnest($2::bigint[])",
            )
            .bind(post.id)
            .bind(&data.tag_ids)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to insert tag links", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(post)
    }

    async fn update(&self, post: &Post) -> AppResult<Post> {
        sqlx::query_as::<_, Post>(
            "UPDATE post SET title = $2, content = $3, date = $4, blog_id = $5 \
             WHERE id = $1 RETURNING *",
        )
        .bind(post.id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.date)
        .bind(post.blog_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update post", e))?
        .ok_or_else(|| AppError::not_found(format!("Post {} not found", post.id)))
    }

    /// Remove the association rows and the post row in one transaction.
    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM rel_post__tag WHERE post_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear tag links", e)
            })?;

        let result = sqlx::query("DELETE FROM post WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete post", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count posts", e))?;
        Ok(count as u64)
    }
}
