//! Blog repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use bloghub_core::error::{AppError, ErrorKind};
use bloghub_core::result::AppResult;
use bloghub_core::traits::Repository;
use bloghub_core::types::pagination::{PageRequest, PageResponse};
use bloghub_core::types::sorting::SortField;
use bloghub_entity::blog::{Blog, BlogWithPosts, NewBlog};
use bloghub_entity::post::Post;

use super::order_clause;

/// Columns a blog listing may be sorted by.
const SORTABLE_COLUMNS: &[&str] = &["id", "name", "handle", "user_id"];

/// Repository for blog CRUD and owner queries.
#[derive(Debug, Clone)]
pub struct BlogRepository {
    pool: PgPool,
}

impl BlogRepository {
    /// Create a new blog repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a blog by ID and hydrate its posts.
    ///
    /// The row lookup and the posts lookup are independent reads and run
    /// concurrently; both complete before the hydrated blog is returned.
    pub async fn find_by_id_with_posts(&self, id: i64) -> AppResult<Option<BlogWithPosts>> {
        let (blog, posts) = futures::try_join!(self.find_by_id(id), self.posts_of(id))?;
        Ok(blog.map(|blog| BlogWithPosts { blog, posts }))
    }

    /// Load the posts owned by a single blog.
    async fn posts_of(&self, blog_id: i64) -> AppResult<Vec<Post>> {
        sqlx::query_as::<_, Post>("SELECT * FROM post WHERE blog_id = $1 ORDER BY id ASC")
            .bind(blog_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load posts", e))
    }

    /// Page through blogs with their posts hydrated.
    ///
    /// One query fetches the page's base rows, a single follow-up query
    /// fetches the posts for every blog on the page, so the query count is
    /// constant regardless of page size.
    pub async fn find_page_with_posts(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<BlogWithPosts>> {
        let base = self.find_all(page, sort).await?;
        let ids: Vec<i64> = base.items.iter().map(|b| b.id).collect();
        let mut by_blog = self.posts_for_blogs(&ids).await?;

        Ok(base.map(|blog| {
            let posts = by_blog.remove(&blog.id).unwrap_or_default();
            BlogWithPosts { blog, posts }
        }))
    }

    /// Find all blogs owned by a user.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>("SELECT * FROM blog WHERE user_id = $1 ORDER BY id ASC")
            .bind(user_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list blogs by user", e)
            })
    }

    /// Find all blogs without an owner.
    pub async fn find_all_where_user_is_null(&self) -> AppResult<Vec<Blog>> {
        sqlx::query_as::<_, Blog>("SELECT * FROM blog WHERE user_id IS NULL ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list unowned blogs", e)
            })
    }

    /// Batched post lookup for a set of blog ids, grouped by owning blog.
    async fn posts_for_blogs(&self, blog_ids: &[i64]) -> AppResult<HashMap<i64, Vec<Post>>> {
        if blog_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let posts = sqlx::query_as::<_, Post>(
            "SELECT * FROM post WHERE blog_id = ANY($1) ORDER BY blog_id, id ASC",
        )
        .bind(blog_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load posts", e))?;

        let mut grouped: HashMap<i64, Vec<Post>> = HashMap::new();
        for post in posts {
            if let Some(blog_id) = post.blog_id {
                grouped.entry(blog_id).or_default().push(post);
            }
        }
        Ok(grouped)
    }
}

#[async_trait]
impl Repository<Blog, NewBlog> for BlogRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Blog>> {
        sqlx::query_as::<_, Blog>("SELECT * FROM blog WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find blog", e))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Blog>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count blogs", e))?;

        let order = order_clause(sort, SORTABLE_COLUMNS)?;
        let blogs = sqlx::query_as::<_, Blog>(&format!(
            "SELECT * FROM blog ORDER BY {order} LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list blogs", e))?;

        Ok(PageResponse::new(
            blogs,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &NewBlog) -> AppResult<Blog> {
        sqlx::query_as::<_, Blog>(
            "INSERT INTO blog (name, handle, user_id) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(&data.name)
        .bind(&data.handle)
        .bind(data.user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create blog", e))
    }

    async fn update(&self, blog: &Blog) -> AppResult<Blog> {
        sqlx::query_as::<_, Blog>(
            "UPDATE blog SET name = $2, handle = $3, user_id = $4 WHERE id = $1 RETURNING *",
        )
        .bind(blog.id)
        .bind(&blog.name)
        .bind(&blog.handle)
        .bind(blog.user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update blog", e))?
        .ok_or_else(|| AppError::not_found(format!("Blog {} not found", blog.id)))
    }

    async fn delete(&self, id: i64) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM blog WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete blog", e))?;
        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM blog")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count blogs", e))?;
        Ok(count as u64)
    }
}
