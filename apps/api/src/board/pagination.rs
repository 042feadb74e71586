use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageParams {
    pub fn validate(self) -> Result<Self, AppError> {
        if self.skip < 0 {
            return Err(AppError::Validation("skip must not be negative".to_string()));
        }
        if self.limit <= 0 {
            return Err(AppError::Validation("limit must be positive".to_string()));
        }
        if self.limit > MAX_LIMIT {
            return Err(AppError::Validation(format!("limit must not exceed {MAX_LIMIT}")));
        }
        Ok(self)
    }
}

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
    pub page: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// `params` must already be validated (limit > 0).
    pub fn new(data: Vec<T>, total: i64, params: PageParams) -> Self {
        let PageParams { skip, limit } = params;
        Self {
            data,
            total,
            skip,
            limit,
            page: skip / limit + 1,
            total_pages: total / limit + i64::from(total % limit != 0),
        }
    }
}
