use serde::{Deserialize, Serialize};

/// Offset pagination requested by a listing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl PageRequest {
    pub const DEFAULT_PAGE: u64 = 1;
    pub const DEFAULT_LIMIT: u64 = 10;

    /// Largest page, limit or offset a store can bind as a signed 64-bit value.
    pub const MAX: u64 = i64::MAX as u64;

    /// Build a page request; missing or zero values fall back to the defaults.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(Self::DEFAULT_PAGE).min(Self::MAX),
            limit: limit.filter(|l| *l > 0).unwrap_or(Self::DEFAULT_LIMIT).min(Self::MAX),
        }
    }

    /// Number of matching documents to skip, capped at [`Self::MAX`].
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .checked_mul(self.limit)
            .map_or(Self::MAX, |offset| offset.min(Self::MAX))
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination summary returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
}

impl Pagination {
    pub fn new(request: PageRequest, total: u64) -> Self {
        Self {
            page: request.page,
            limit: request.limit,
            total,
            pages: total.div_ceil(request.limit),
        }
    }
}
