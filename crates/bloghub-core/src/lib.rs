//! # bloghub-core
//!
//! Core crate for BlogHub. Contains configuration schemas, the generic
//! repository trait, pagination/sorting types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other BlogHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
