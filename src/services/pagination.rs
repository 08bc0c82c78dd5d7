use serde::Serialize;
use utoipa::ToSchema;

use crate::services::db::{ListFilter, SlugDocument, SlugStore, StoreError, Window};

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// Page coordinates taken from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/**
 * reads the leading decimal digits of a query value, so "2abc" is 2
 * anything without a positive number falls back to the default
 */
fn leading_number(raw: Option<&str>, fallback: u64) -> u64 {
    let Some(raw) = raw else {
        return fallback;
    };
    let trimmed = raw.trim_start();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    match digits.parse::<u64>() {
        Ok(value) if value > 0 => value,
        // too many digits to fit still means "a lot"
        Err(_) if !digits.is_empty() => u64::MAX,
        _ => fallback,
    }
}

impl PageRequest {
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: leading_number(page, DEFAULT_PAGE),
            limit: leading_number(limit, DEFAULT_LIMIT),
        }
    }

    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn window(&self) -> Window {
        Window {
            skip: self.skip(),
            limit: self.limit,
        }
    }

    pub fn paginate(&self, total: u64) -> Pagination {
        Pagination {
            total,
            page: self.page,
            limit: self.limit,
            total_pages: total.div_ceil(self.limit),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub total_pages: u64,
}

/// One page of documents plus the figures describing it.
#[derive(Debug, Clone)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

/// Runs the windowed find and the count side by side.
pub async fn fetch_page<T: SlugDocument>(
    store: &dyn SlugStore<T>,
    filter: &ListFilter,
    request: PageRequest,
) -> Result<Paged<T>, StoreError> {
    let (items, total) = tokio::try_join!(
        store.find(filter, Some(request.window())),
        store.count(filter)
    )?;
    Ok(Paged {
        items,
        pagination: request.paginate(total),
    })
}
