//! Pagination and sorting query parameters for list endpoints.

use serde::{Deserialize, Serialize};

use bloghub_core::result::AppResult;
use bloghub_core::types::pagination::PageRequest;
use bloghub_core::types::sorting::SortField;

/// Query parameters for paginated endpoints.
///
/// Raw values are kept as signed integers so that out-of-range input
/// surfaces as an invalid-argument error instead of a deserialization
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListParams {
    /// Page number (1-based, default: 1).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Items per page (default: 20, max: 100).
    #[serde(default = "default_per_page")]
    pub per_page: i64,
    /// Sort specification as `field` or `field,direction`.
    pub sort: Option<String>,
    /// Whether to hydrate associated entities in list responses.
    #[serde(default)]
    pub eagerload: bool,
}

fn default_page() -> i64 {
    1
}

fn default_per_page() -> i64 {
    20
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            per_page: default_per_page(),
            sort: None,
            eagerload: false,
        }
    }
}

impl ListParams {
    /// Validate the raw page values into a `PageRequest`.
    pub fn page_request(&self) -> AppResult<PageRequest> {
        PageRequest::try_new(self.page, self.per_page)
    }

    /// Parse the optional sort parameter.
    pub fn sort_field(&self) -> AppResult<Option<SortField>> {
        self.sort.as_deref().map(SortField::parse).transpose()
    }
}
