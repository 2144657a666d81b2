//! Generic repository trait for database access.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::pagination::{PageRequest, PageResponse};
use crate::types::sorting::SortField;

/// Generic CRUD repository trait.
///
/// `Entity` is a stored row with an assigned identity, `New` is the payload
/// used to insert one. Entity-specific query methods (parent-key filters,
/// association filters, eager fetches) are defined on the concrete
/// repository structs.
#[async_trait]
pub trait Repository<Entity, New>: Send + Sync + 'static
where
    Entity: Send + Sync + 'static + serde::Serialize,
    New: Send + Sync + 'static,
{
    /// Find an entity by its primary key. Absence is `Ok(None)`, not an error.
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Entity>>;

    /// Find all entities with pagination and optional sorting.
    ///
    /// Ordering must be deterministic across repeated calls on unchanged
    /// data; implementations tie-break on ascending identity.
    async fn find_all(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Entity>>;

    /// Insert a new entity and return the stored row with its assigned id.
    async fn create(&self, data: &New) -> AppResult<Entity>;

    /// Overwrite every field of an existing entity and return the stored row.
    async fn update(&self, entity: &Entity) -> AppResult<Entity>;

    /// Delete an entity by its primary key. Returns `true` if a row was removed.
    async fn delete(&self, id: i64) -> AppResult<bool>;

    /// Count total entities.
    async fn count(&self) -> AppResult<u64>;
}
