//! Blog CRUD operations and owner queries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use bloghub_core::error::AppError;
use bloghub_core::result::AppResult;
use bloghub_core::traits::Repository;
use bloghub_core::types::pagination::{PageRequest, PageResponse};
use bloghub_core::types::sorting::SortField;
use bloghub_database::repositories::blog::BlogRepository;
use bloghub_entity::blog::{Blog, BlogPatch, BlogWithPosts, NewBlog};

/// Incoming blog payload for create and replace operations.
///
/// Every field is optional at the wire level; required-field and
/// identity-state rules are enforced here, before any storage mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogPayload {
    /// Entity identity. Must be absent on create and match the path on replace.
    pub id: Option<i64>,
    /// Display name.
    pub name: Option<String>,
    /// URL handle.
    pub handle: Option<String>,
    /// Owning user ID.
    pub user_id: Option<i64>,
}

/// Manages blog CRUD operations.
#[derive(Debug, Clone)]
pub struct BlogService {
    /// Blog repository.
    blog_repo: Arc<BlogRepository>,
}

impl BlogService {
    /// Create a new blog service.
    pub fn new(blog_repo: Arc<BlogRepository>) -> Self {
        Self { blog_repo }
    }

    /// Get a blog by ID with its posts hydrated.
    pub async fn get_blog(&self, id: i64) -> AppResult<BlogWithPosts> {
        self.blog_repo
            .find_by_id_with_posts(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))
    }

    /// List blogs without association hydration.
    pub async fn list_blogs(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<Blog>> {
        self.blog_repo.find_all(page, sort).await
    }

    /// List blogs with their posts hydrated (batched follow-up query).
    pub async fn list_blogs_eager(
        &self,
        page: &PageRequest,
        sort: Option<&SortField>,
    ) -> AppResult<PageResponse<BlogWithPosts>> {
        self.blog_repo.find_page_with_posts(page, sort).await
    }

    /// List blogs owned by a user.
    pub async fn blogs_by_user(&self, user_id: i64) -> AppResult<Vec<Blog>> {
        self.blog_repo.find_by_user(user_id).await
    }

    /// List blogs without an owner.
    pub async fn orphan_blogs(&self) -> AppResult<Vec<Blog>> {
        self.blog_repo.find_all_where_user_is_null().await
    }

    /// Create a new blog. The payload must not carry an identity.
    pub async fn create_blog(&self, payload: BlogPayload) -> AppResult<Blog> {
        let data = validate_create(&payload)?;
        let blog = self.blog_repo.create(&data).await?;

        info!(blog_id = blog.id, handle = %blog.handle, "Blog created");
        Ok(blog)
    }

    /// Replace every field of an existing blog.
    pub async fn replace_blog(&self, id: i64, payload: BlogPayload) -> AppResult<Blog> {
        require_matching_id(id, payload.id)?;
        let data = validate_create(&BlogPayload {
            id: None,
            ..payload
        })?;

        // Reject before writing when the row does not exist.
        self.blog_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))?;

        let blog = self
            .blog_repo
            .update(&Blog {
                id,
                name: data.name,
                handle: data.handle,
                user_id: data.user_id,
            })
            .await?;

        info!(blog_id = id, "Blog replaced");
        Ok(blog)
    }

    /// Merge-patch a blog: only supplied fields overwrite stored values.
    pub async fn patch_blog(
        &self,
        id: i64,
        body_id: Option<i64>,
        patch: BlogPatch,
    ) -> AppResult<Blog> {
        require_matching_id(id, body_id)?;
        validate_patch(&patch)?;

        let existing = self
            .blog_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Blog {id} not found")))?;

        let merged = patch.apply(existing);
        let blog = self.blog_repo.update(&merged).await?;

        info!(blog_id = id, "Blog patched");
        Ok(blog)
    }

    /// Delete a blog. Idempotent in effect: deleting a missing row is not
    /// an error. Posts keep existing with a nulled blog reference.
    pub async fn delete_blog(&self, id: i64) -> AppResult<()> {
        let deleted = self.blog_repo.delete(id).await?;
        if deleted {
            info!(blog_id = id, "Blog deleted");
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

/// Validate a blog payload for persistence, producing the insert data.
fn validate_create(payload: &BlogPayload) -> AppResult<NewBlog> {
    if payload.id.is_some() {
        return Err(AppError::validation(
            "A new blog cannot already have an id",
        ));
    }
    let name = payload
        .name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| AppError::validation("Blog name is required"))?;
    if name.len() < 3 {
        return Err(AppError::validation(
            "Blog name must be at least 3 characters",
        ));
    }
    let handle = payload
        .handle
        .as_deref()
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or_else(|| AppError::validation("Blog handle is required"))?;
    if handle.len() < 2 {
        return Err(AppError::validation(
            "Blog handle must be at least 2 characters",
        ));
    }

    Ok(NewBlog {
        name: name.to_string(),
        handle: handle.to_string(),
        user_id: payload.user_id,
    })
}

/// Validate the supplied fields of a blog patch.
fn validate_patch(patch: &BlogPatch) -> AppResult<()> {
    if let Some(name) = &patch.name {
        if name.trim().len() < 3 {
            return Err(AppError::validation(
                "Blog name must be at least 3 characters",
            ));
        }
    }
    if let Some(handle) = &patch.handle {
        if handle.trim().len() < 2 {
            return Err(AppError::validation(
                "Blog handle must be at least 2 characters",
            ));
        }
    }
    Ok(())
}
