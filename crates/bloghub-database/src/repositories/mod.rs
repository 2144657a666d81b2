//! Repository implementations for all BlogHub entities.

pub mod blog;
pub mod post;
pub mod tag;

pub use blog::BlogRepository;
pub use post::PostRepository;
pub use tag::TagRepository;

use bloghub_core::error::AppError;
use bloghub_core::result::AppResult;
use bloghub_core::types::sorting::SortField;

/// Build a validated `ORDER BY` clause from an optional sort specification.
///
/// The column name is checked against the per-entity whitelist before being
/// interpolated into SQL. Every clause ends with an ascending `id` tie-break
/// so that repeated page reads on unchanged data are deterministic.
pub(crate) fn order_clause(sort: Option<&SortField>, allowed: &[&str]) -> AppResult<String> {
    match sort {
        None => Ok("id ASC".to_string()),
        Some(sort) => {
            if !allowed.contains(&sort.field.as_str()) {
                return Err(AppError::invalid_argument(format!(
                    "Cannot sort by '{}'; allowed fields: {}",
                    sort.field,
                    allowed.join(", ")
                )));
            }
            if sort.field == "id" {
                Ok(format!("id {}", sort.direction.as_sql()))
            } else {
                Ok(format!(
                    "{} {}, id ASC",
                    sort.field,
                    sort.direction.as_sql()
                ))
            }
        }
    }
}
