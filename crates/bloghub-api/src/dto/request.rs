//! Request DTOs with validation.
//!
//! Create and replace share one payload shape per entity: every field is
//! optional at the wire level so that identity-state and required-field
//! rules produce domain validation errors instead of deserialization
//! failures. Patch payloads carry only the fields to merge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use bloghub_entity::blog::BlogPatch;
use bloghub_entity::post::PostPatch;
use bloghub_entity::tag::TagPatch;
use bloghub_service::blog::BlogPayload;
use bloghub_service::post::PostPayload;
use bloghub_service::tag::TagPayload;

/// Blog payload for POST and PUT.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BlogRequest {
    /// Entity identity (must be absent on create).
    pub id: Option<i64>,
    /// Display name.
    #[validate(length(min = 3, max = 255))]
    pub name: Option<String>,
    /// URL handle.
    #[validate(length(min = 2, max = 255))]
    pub handle: Option<String>,
    /// Owning user ID.
    pub user_id: Option<i64>,
}

impl From<BlogRequest> for BlogPayload {
    fn from(req: BlogRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
            handle: req.handle,
            user_id: req.user_id,
        }
    }
}

/// Blog payload for PATCH (merge patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct BlogPatchRequest {
    /// Entity identity (must match the path when present).
    pub id: Option<i64>,
    /// New display name.
    #[validate(length(min = 3, max = 255))]
    pub name: Option<String>,
    /// New URL handle.
    #[validate(length(min = 2, max = 255))]
    pub handle: Option<String>,
    /// New owning user ID.
    pub user_id: Option<i64>,
}

impl BlogPatchRequest {
    /// Split into the body identity and the entity-level patch.
    pub fn into_parts(self) -> (Option<i64>, BlogPatch) {
        (
            self.id,
            BlogPatch {
                name: self.name,
                handle: self.handle,
                user_id: self.user_id,
            },
        )
    }
}

/// Post payload for POST and PUT.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostRequest {
    /// Entity identity (must be absent on create).
    pub id: Option<i64>,
    /// Post title.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// Post body.
    pub content: Option<String>,
    /// Publication date.
    pub date: Option<DateTime<Utc>>,
    /// Owning blog ID.
    pub blog_id: Option<i64>,
    /// Tags to link in the association table.
    pub tag_ids: Option<Vec<i64>>,
}

impl From<PostRequest> for PostPayload {
    fn from(req: PostRequest) -> Self {
        Self {
            id: req.id,
            title: req.title,
            content: req.content,
            date: req.date,
            blog_id: req.blog_id,
            tag_ids: req.tag_ids,
        }
    }
}

/// Post payload for PATCH (merge patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct PostPatchRequest {
    /// Entity identity (must match the path when present).
    pub id: Option<i64>,
    /// New title.
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    /// New body.
    pub content: Option<String>,
    /// New publication date.
    pub date: Option<DateTime<Utc>>,
    /// New owning blog ID.
    pub blog_id: Option<i64>,
    /// Replacement tag set.
    pub tag_ids: Option<Vec<i64>>,
}

impl PostPatchRequest {
    /// Split into the body identity and the entity-level patch.
    pub fn into_parts(self) -> (Option<i64>, PostPatch) {
        (
            self.id,
            PostPatch {
                title: self.title,
                content: self.content,
                date: self.date,
                blog_id: self.blog_id,
                tag_ids: self.tag_ids,
            },
        )
    }
}

/// Tag payload for POST and PUT.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TagRequest {
    /// Entity identity (must be absent on create).
    pub id: Option<i64>,
    /// Tag name.
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
}

impl From<TagRequest> for TagPayload {
    fn from(req: TagRequest) -> Self {
        Self {
            id: req.id,
            name: req.name,
        }
    }
}

/// Tag payload for PATCH (merge patch).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TagPatchRequest {
    /// Entity identity (must match the path when present).
    pub id: Option<i64>,
    /// New tag name.
    #[validate(length(min = 2, max = 255))]
    pub name: Option<String>,
}

impl TagPatchRequest {
    /// Split into the body identity and the entity-level patch.
    pub fn into_parts(self) -> (Option<i64>, TagPatch) {
        (self.id, TagPatch { name: self.name })
    }
}
