//! Tag entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A tag referenced by zero or more posts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Tag {
    /// Unique tag identifier, assigned at creation.
    pub id: i64,
    /// Tag name.
    pub name: String,
}

/// Data required to create a new tag.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTag {
    /// Tag name.
    pub name: String,
}

/// Partial update for a tag.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TagPatch {
    /// New tag name.
    pub name: Option<String>,
}

impl TagPatch {
    /// Merge this patch into an existing tag. Pure function.
    pub fn apply(&self, mut tag: Tag) -> Tag {
        if let Some(name) = &self.name {
            tag.name = name.clone();
        }
        tag
    }

    /// Whether the patch carries no changes.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
    }
}
