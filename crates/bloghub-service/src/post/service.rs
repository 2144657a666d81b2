//! Post CRUD operations, parent-key queries, and tag association upkeep.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use bloghub_core::error::AppError;
use bloghub_core::result::AppResult;
use bloghub_core::traits::Repository;
use bloghub_core::types::pagination::{PageRequest, PageResponse};
use bloghub_core::types::sorting::SortField;
use bloghub_database::repositories::post::PostRepository;
use bloghub_entity::post::{NewPost, Post, PostPatch, PostWithTags};

/// Incoming post payload for create and replace operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostPayload {
    /// Entity identity. Must be absent on create and match the path on replace.
    pub id: Option<i64>,
    /// Post title.
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

/// Manages post CRUD operations.
#[derive(Debug, Clone)]
pub struct PostService {
    /// Post repository.
    post_repo: Arc<PostRepository>,
}

impl PostService {
    /// Create a new post service.
    pub fn new(post_repo: Arc<PostRepository>) -> Self {
        Self { post_repo }
    }

    /// Get a post by ID with its tags hydrated.
    pub async fn get_post(&self, id: i64) -> AppResult<PostWithTags> {
        self.post_repo
            .find_by_id_with_tags(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Post {id} not found")))
    }

    /// List posts without association hydration.
    pub async fn list_posts(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Post>> {
        self.post_repo.find_all(page, sort).await
    }

    /// List posts with their tags hydrated (batched follow-up query).
    pub async fn list_posts_eager(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<PostWithTags>> {
        self.post_repo.find_page_with_tags(page, sort).await
    }

    /// List posts of a blog (parent-key filter).
    pub async fn posts_by_blog(&self, blog_id: i64) -> AppResult<Vec<Post>> {
        self.post_repo.find_by_blog(blog_id).await
    }

    /// List posts without an owning blog (orphan view).
    pub async fn orphan_posts(&self) -> AppResult<Vec<Post>> {
        self.post_repo.find_all_where_blog_is_null().await
    }

    /// List posts carrying a tag (association-table filter).
    pub async fn posts_by_tag(&self, tag_id: i64) -> AppResult<Vec<Post>> {
        self.post_repo.find_by_tag(tag_id).await
    }

    /// Create a new post, linking the supplied tags in the same transaction.
    pub async fn create_post(&self, payload: PostPayload) -> AppResult<Post> {
        let data = validate_create(&payload)?;
        let post = self.post_repo.create(&data).await?;

        info!(post_id = post.id, title = %post.title, "Post created");
        Ok(post)
    }

    /// Replace every field of an existing post. The tag association set is
    /// rewritten to exactly the supplied set (empty when omitted).
    pub async fn replace_post(&self, id: i64, payload: PostPayload) -> AppResult<Post> {
        require_matching_id(id, payload.id)?;
        let data = validate_create(&PostPayload {
            id: None,
            ..payload
        })?;

        // Reject before writing when the row does not exist.
        self.post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Post {id} not found")))?;

        let post = self
            .post_repo
            .update(&Post {
                id,
                title: data.title,
                content: data.content,
                date: data.date,
                blog_id: data.blog_id,
            })
            .await?;
        self.post_repo.replace_tags(id, &data.tag_ids).await?;

        info!(post_id = id, "Post replaced");
        Ok(post)
    }

    /// Merge-patch a post: only supplied fields overwrite stored values;
    /// the tag set is replaced only when `tag_ids` is supplied.
    pub async fn patch_post(
        &self,
        id: i64,
        body_id: Option<i64>,
        patch: PostPatch,
    ) -> AppResult<Post> {
        require_matching_id(id, body_id)?;
        validate_patch(&patch)?;

        let existing = self
            .post_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Post {id} not found")))?;

        let merged = patch.apply(existing);
        let post = self.post_repo.update(&merged).await?;

        if let Some(tag_ids) = &patch.tag_ids {
            self.post_repo.replace_tags(id, tag_ids).await?;
        }

        info!(post_id = id, "Post patched");
        Ok(post)
    }

    /// Delete a post and its tag-association rows. Idempotent in effect.
    pub async fn delete_post(&self, id: i64) -> AppResult<()> {
        let deleted = self.post_repo.delete(id).await?;
        if deleted {
            info!(post_id = id, "Post deleted");
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

/// Validate a post payload for persistence, producing the insert data.
fn validate_create(payload: &PostPayload) -> AppResult<NewPost> {
    if payload.id.is_some() {
        return Err(AppError::validation(
            "A new post cannot already have an id",
        ));
    }
    let title = payload
        .title
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::validation("Post title is required"))?;
    let date = payload
        .date
        .ok_or_else(|| AppError::validation("Post date is required"))?;

    Ok(NewPost {
        title: title.to_string(),
        content: payload.content.clone(),
        date,
        blog_id: payload.blog_id,
        tag_ids: payload.tag_ids.clone().unwrap_or_default(),
    })
}

/// Validate the supplied fields of a post patch.
fn validate_patch(patch: &PostPatch) -> AppResult<()> {
    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(AppError::validation("Post title must not be empty"));
        }
    }
    Ok(())
}
