//! # bloghub-database
//!
//! PostgreSQL database connection management and concrete repository
//! implementations for all BlogHub entities.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
