//! Tag CRUD operations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use bloghub_core::error::AppError;
use bloghub_core::result::AppResult;
use bloghub_core::traits::Repository;
use bloghub_core::types::pagination::{PageRequest, PageResponse};
use bloghub_core::types::sorting::SortField;
use bloghub_database::repositories::tag::TagRepository;
use bloghub_entity::tag::{NewTag, Tag, TagPatch};

/// Incoming tag payload for create and replace operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagPayload {
    /// Entity identity. Must be absent on create and match the path on replace.
    pub id: Option<i64>,
    /// Tag name.
    pub name: Option<String>,
}

/// Manages tag CRUD operations.
#[derive(Debug, Clone)]
pub struct TagService {
    /// Tag repository.
    tag_repo: Arc<TagRepository>,
}

impl TagService {
    /// Create a new tag service.
    pub fn new(tag_repo: Arc<TagRepository>) -> Self {
        Self { tag_repo }
    }

    /// Get a tag by ID.
    pub async fn get_tag(&self, id: i64) -> AppResult<Tag> {
        self.tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))
    }

    /// List tags.
    pub async fn list_tags(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Tag>> {
        self.tag_repo.find_all(page, sort).await
    }

    /// Create a new tag.
    pub async fn create_tag(&self, payload: TagPayload) -> AppResult<Tag> {
        let data = validate_create(&payload)?;
        let tag = self.tag_repo.create(&data).await?;

        info!(tag_id = tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }

    /// Replace every field of an existing tag.
    pub async fn replace_tag(&self, id: i64, payload: TagPayload) -> AppResult<Tag> {
        require_matching_id(id, payload.id)?;
        let data = validate_create(&TagPayload { id: None, ..payload })?;

        self.tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))?;

        let tag = self
            .tag_repo
            .update(&Tag {
                id,
                name: data.name,
            })
            .await?;

        info!(tag_id = id, "Tag replaced");
        Ok(tag)
    }

    /// Merge-patch a tag.
    pub async fn patch_tag(
        &self,
        id: i64,
        body_id: Option<i64>,
        patch: TagPatch,
    ) -> AppResult<Tag> {
        require_matching_id(id, body_id)?;
        validate_patch(&patch)?;

        let existing = self
            .tag_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tag {id} not found")))?;

        let tag = self.tag_repo.update(&patch.apply(existing)).await?;

        info!(tag_id = id, "Tag patched");
        Ok(tag)
    }

    /// Delete a tag and its association rows. Posts are never cascaded.
    pub async fn delete_tag(&self, id: i64) -> AppResult<()> {
        let deleted = self.tag_repo.delete(id).await?;
        if deleted {
            info!(tag_id = id, "Tag deleted");
        }
        Ok(())
    }
}

/// Identity rule shared by replace and patch: a body id, when present,
/// must match the path id.
fn require_matching_id(path_id: i64, body_id: Option<i64>) -> AppResult<()> {
    match body_id {
        Some(body_id) if body_id != path_id => Err(AppError::validation(format!(
            "Body id {body_id} does not match path id {path_id}"
        ))),
        _ => Ok(()),
    }
}

/// Validate a tag payload for persistence, producing the insert data.
fn validate_create(payload: &TagPayload) -> AppResult<NewTag> {
    if payload.id.is_some() {
        return Err(AppError::validation("A new tag cannot already have an id"));
    }
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Tag name is required"))?;
    if name.len() < 2 {
        return Err(AppError::validation(
            "Tag name must be at least 2 characters",
        ));
    }

    Ok(NewTag {
        name: name.to_string(),
    })
}

/// Validate the supplied fields of a tag patch.
fn validate_patch(patch: &TagPatch) -> AppResult<()> {
    if let Some(name) = &patch.name {
        if name.trim().len() < 2 {
            return Err(AppError::validation(
                "Tag name must be at least 2 characters",
            ));
        }
    }
    Ok(())
}
