//! Traits shared across the BlogHub workspace.

pub mod repository;

pub use repository::Repository;
