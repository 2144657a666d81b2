//! Tag repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use bloghub_core::error::{AppError, ErrorKind};
use bloghub_core::result::AppResult;
use bloghub_core::traits::Repository;
use bloghub_core::types::pagination::{PageRequest, PageResponse};
use bloghub_core::types::sorting::SortField;
use bloghub_entity::tag::{NewTag, Tag};

use super::order_clause;

/// Columns a tag listing may be sorted by.
const SORTABLE_COLUMNS: &[&str] = &["id", "name"];

/// Repository for tag CRUD.
#[derive(Debug, Clone)]
pub struct TagRepository {
    pool: PgPool,
}

impl TagRepository {
    /// Create a new tag repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Repository<Tag, NewTag> for TagRepository {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Tag>> {
        sqlx::query_as::<_, Tag>("SELECT * FROM tag WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find tag", e))
    }

    async fn find_all(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Tag>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tag")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tags", e))?;

        let order = order_clause(sort, SORTABLE_COLUMNS)?;
        let tags = sqlx::query_as::<_, Tag>(&format!(
            "SELECT * FROM tag ORDER BY {order} LIMIT $1 OFFSET $2"
        ))
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list tags", e))?;

        Ok(PageResponse::new(
            tags,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    async fn create(&self, data: &NewTag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("INSERT INTO tag (name) VALUES ($1) RETURNING *")
            .bind(&data.name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create tag", e))
    }

    async fn update(&self, tag: &Tag) -> AppResult<Tag> {
        sqlx::query_as::<_, Tag>("UPDATE tag SET name = $2 WHERE id = $1 RETURNING *")
            .bind(tag.id)
            .bind(&tag.name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update tag", e))?
            .ok_or_else(|| AppError::not_found(format!("Tag {} not found", tag.id)))
    }

    /// Remove the association rows and the tag row in one transaction.
    /// Posts referencing the tag are never touched.
    async fn delete(&self, id: i64) -> AppResult<bool> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        sqlx::query("DELETE FROM rel_post__tag WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to clear tag links", e)
            })?;

        let result = sqlx::query("DELETE FROM tag WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete tag", e))?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tag")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count tags", e))?;
        Ok(count as u64)
    }
}
