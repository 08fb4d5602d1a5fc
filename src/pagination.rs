use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

pub const PAGINATION_DEFAULT_PAGE: u32 = 0;
pub const PAGINATION_DEFAULT_LIMIT: u32 = 10;
pub const PAGINATION_MAX_LIMIT: u32 = 100;

/// Page request as supplied by a caller; missing fields fall back to the defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationOptions {
    pub page: Option<u32>,
    #[validate(range(min = 1, max = 100))]
    pub limit: Option<u32>,
}

impl PaginationOptions {
    pub fn new(page: u32, limit: u32) -> Self {
        PaginationOptions {
            page: Some(page),
            limit: Some(limit),
        }
    }
}

/// Fully resolved page request. `limit` is always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Pagination {
            page: PAGINATION_DEFAULT_PAGE,
            limit: PAGINATION_DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    pub fn skip(&self) -> i64 {
        i64::from(self.page) * i64::from(self.limit)
    }

    pub fn take(&self) -> i64 {
        i64::from(self.limit)
    }

    pub fn meta(&self, total_items: i64) -> PaginationMeta {
        PaginationMeta {
            total_items,
            total_pages: total_pages(total_items, self.limit),
        }
    }
}

/// Merges caller options with the defaults field by field and clamps the limit.
pub fn validate_pagination_options(options: Option<PaginationOptions>) -> Pagination {
    let options = options.unwrap_or_default();
    Pagination {
        page: options.page.unwrap_or(PAGINATION_DEFAULT_PAGE),
        limit: options
            .limit
            .unwrap_or(PAGINATION_DEFAULT_LIMIT)
            .clamp(1, PAGINATION_MAX_LIMIT),
    }
}

/// Zero-indexed page count: one page of results reports 0, an empty set reports -1.
pub fn total_pages(total_items: i64, limit: u32) -> i64 {
    let limit = i64::from(limit.max(1));
    let pages = if total_items <= 0 {
        0
    } else {
        (total_items + limit - 1) / limit
    };
    pages - 1
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    pub total_items: i64,
    pub total_pages: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaginatedList<T> {
    pub items: Vec<T>,
    pub meta: PaginationMeta,
}
