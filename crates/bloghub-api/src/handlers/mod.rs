//! HTTP request handlers, organized by entity.

pub mod blog;
pub mod health;
pub mod post;
pub mod tag;
