//! # bloghub-service
//!
//! Business logic services for BlogHub. Each entity gets a service that
//! enforces the identity-state rules (create requires an absent id, replace
//! and patch require a present, matching id), validates required fields
//! before any storage mutation, and orchestrates the repositories.

pub mod blog;
pub mod post;
pub mod tag;

pub use blog::service::BlogService;
pub use post::service::PostService;
pub use tag::service::TagService;
