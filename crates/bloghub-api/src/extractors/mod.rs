//! Query parameter extractors.

pub mod pagination;

pub use pagination::ListParams;
