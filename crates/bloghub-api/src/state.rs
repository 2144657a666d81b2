//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use sqlx::PgPool;

use bloghub_core::config::AppConfig;
use bloghub_database::repositories::blog::BlogRepository;
use bloghub_database::repositories::post::PostRepository;
use bloghub_database::repositories::tag::TagRepository;
use bloghub_service::blog::BlogService;
use bloghub_service::post::PostService;
use bloghub_service::tag::TagService;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// PostgreSQL connection pool
    pub db_pool: PgPool,

    /// Blog repository
    pub blog_repo: Arc<BlogRepository>,
    /// Post repository
    pub post_repo: Arc<PostRepository>,
    /// Tag repository
    pub tag_repo: Arc<TagRepository>,

    /// Blog service
    pub blog_service: Arc<BlogService>,
    /// Post service
    pub post_service: Arc<PostService>,
    /// Tag service
    pub tag_service: Arc<TagService>,
}

impl AppState {
    /// Wire repositories and services on top of a connection pool.
    pub fn new(config: AppConfig, db_pool: PgPool) -> Self {
        let blog_repo = Arc::new(BlogRepository::new(db_pool.clone()));
        let post_repo = Arc::new(PostRepository::new(db_pool.clone()));
        let tag_repo = Arc::new(TagRepository::new(db_pool.clone()));

        let blog_service = Arc::new(BlogService::new(Arc::clone(&blog_repo)));
        let post_service = Arc::new(PostService::new(Arc::clone(&post_repo)));
        let tag_service = Arc::new(TagService::new(Arc::clone(&tag_repo)));

        Self {
            config: Arc::new(config),
            db_pool,
            blog_repo,
            post_repo,
            tag_repo,
            blog_service,
            post_service,
            tag_service,
        }
    }
}
