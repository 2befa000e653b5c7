//! Pagination types for the user list endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::domain::UserResponse;
use crate::infra::Document;

/// Pagination query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_per_page")]
    pub per_page: u64,
}

fn default_page() -> u64 {
    DEFAULT_PAGE_NUMBER
}

fn default_per_page() -> u64 {
    DEFAULT_PAGE_SIZE
}

impl PaginationParams {
    /// Page size capped at the maximum
    pub fn limit(&self) -> u64 {
        self.per_page.min(MAX_PAGE_SIZE)
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE_NUMBER,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of users, shaped like the persisted document: flat
/// pagination fields next to the data slice. Totals cover the whole
/// collection, not the returned page.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserPage {
    #[schema(example = 1)]
    pub page: u64,
    #[schema(example = 6)]
    pub per_page: u64,
    #[schema(example = 12)]
    pub total: u64,
    #[schema(example = 2)]
    pub total_pages: u64,
    pub data: Vec<UserResponse>,
}

impl From<Document> for UserPage {
    fn from(document: Document) -> Self {
        Self {
            page: document.page,
            per_page: document.per_page,
            total: document.total,
            total_pages: document.total_pages,
            data: document.data.into_iter().map(UserResponse::from).collect(),
        }
    }
}
