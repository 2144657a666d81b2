//! Core type definitions used across the BlogHub workspace.

pub mod pagination;
pub mod sorting;

pub use pagination::{PageRequest, PageResponse};
pub use sorting::{SortDirection, SortField};
