//! Post entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::tag::Tag;

/// A blog post, optionally attached to a blog and tagged with zero or
/// more tags through the `rel_post__tag` association table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Post {
    /// Unique post identifier, assigned at creation.
    pub id: i64,
    /// Post title.
    pub title: String,
    /// Post body (optional).
    pub content: Option<String>,
    /// Publication date.
    pub date: DateTime<Utc>,
    /// Owning blog ID (null for orphaned posts).
    pub blog_id: Option<i64>,
}

impl Post {
    /// Check if this post has no owning blog.
    pub fn is_orphan(&self) -> bool {
        self.blog_id.is_none()
    }
}

/// Data required to create a new post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    /// Post title.
    pub title: String,
    /// Post body.
    pub content: Option<String>,
    /// Publication date.
    pub date: DateTime<Utc>,
    /// Owning blog ID.
    pub blog_id: Option<i64>,
    /// Tags to link in the association table.
    #[serde(default)]
    pub tag_ids: Vec<i64>,
}

/// Partial update for a post. Only supplied fields overwrite stored values;
/// `tag_ids` replaces the full association set when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPatch {
    /// New title.
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

impl PostPatch {
    /// Merge this patch into an existing post, leaving unsupplied fields
    /// untouched. Pure function; the identity is never changed and the tag
    /// set is handled by the caller.
    pub fn apply(&self, mut post: Post) -> Post {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = Some(content.clone());
        }
        if let Some(date) = self.date {
            post.date = date;
        }
        if let Some(blog_id) = self.blog_id {
            post.blog_id = Some(blog_id);
        }
        post
    }

    /// Whether the patch carries no row-level changes (tag set aside).
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.date.is_none()
            && self.blog_id.is_none()
            && self.tag_ids.is_none()
    }
}

/// A post together with its tags (eager many-to-many hydration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostWithTags {
    /// The post row.
    #[serde(flatten)]
    pub post: Post,
    /// Tags linked to this post.
    pub tags: Vec<Tag>,
}
