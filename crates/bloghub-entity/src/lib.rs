//! # bloghub-entity
//!
//! Domain entity models for BlogHub. Every primary struct in this crate
//! represents a database table row. All entities derive `Debug`, `Clone`,
//! `Serialize`, `Deserialize`, and database entities additionally derive
//! `sqlx::FromRow`. Each entity ships with a create payload (`New*`) and a
//! merge-patch payload (`*Patch`) whose `apply` function performs a pure
//! field-wise merge.

pub mod blog;
pub mod post;
pub mod tag;
