use serde::Serialize;

use crate::utils::error::AppError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Validated page/limit pair extracted from a list request.
#[derive(Debug, Clone, Copy)]
pub struct PageParams {
    pub page: i64,
    pub limit: i64,
}

impl PageParams {
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, AppError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page < 1 {
            return Err(AppError::Validation("page must be at least 1".to_string()));
        }
        if limit < 1 {
            return Err(AppError::Validation("limit must be at least 1".to_string()));
        }
        Ok(Self { page, limit })
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

/// Metadata block attached to every list response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
    pub items_per_page: i64,
}

impl Pagination {
    pub fn new(params: PageParams, total_items: i64) -> Self {
        Self {
            current_page: params.page,
            total_pages: (total_items + params.limit - 1) / params.limit,
            total_items,
            items_per_page: params.limit,
        }
    }
}
