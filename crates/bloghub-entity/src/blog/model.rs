//! Blog entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::post::Post;

/// A blog owned by at most one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Blog {
    /// Unique blog identifier, assigned at creation.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// URL handle.
    pub handle: String,
    /// Owning user ID (null for unowned blogs).
    pub user_id: Option<i64>,
}

impl Blog {
    /// Check if this blog has no owner.
    pub fn is_orphan(&self) -> bool {
        self.user_id.is_none()
    }
}

/// Data required to create a new blog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBlog {
    /// Display name.
    pub name: String,
    /// URL handle.
    pub handle: String,
    /// Owning user ID.
    pub user_id: Option<i64>,
}

/// Partial update for a blog. Only supplied fields overwrite stored values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPatch {
    /// New display name.
    pub name: Option<String>,
    /// New URL handle.
    pub handle: Option<String>,
    /// New owning user ID.
    pub user_id: Option<i64>,
}

impl BlogPatch {
    /// Merge this patch into an existing blog, leaving unsupplied fields
    /// untouched. Pure function; the identity is never changed.
    pub fn apply(&self, mut blog: Blog) -> Blog {
        if let Some(name) = &self.name {
            blog.name = name.clone();
        }
        if let Some(handle) = &self.handle {
            blog.handle = handle.clone();
        }
        if let Some(user_id) = self.user_id {
            blog.user_id = Some(user_id);
        }
        blog
    }

    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.handle.is_none() && self.user_id.is_none()
    }
}

/// A blog together with its posts (eager one-to-many hydration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogWithPosts {
    /// The blog row.
    #[serde(flatten)]
    pub blog: Blog,
    /// Posts owned by this blog.
    pub posts: Vec<Post>,
}
