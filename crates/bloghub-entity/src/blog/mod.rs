//! Blog domain entities.

pub mod model;

pub use model::{Blog, BlogPatch, BlogWithPosts, NewBlog};
