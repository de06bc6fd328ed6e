/// Page-numbered listing
///
/// Lists are served five rows at a time. Pages are 1-based and selected with
/// `?page=N`; requesting a page past the end is a 404, except page 1 of an
/// empty list which is returned with no results.
///
/// # Example
///
/// ```
/// use taxi_api::pagination::PageWindow;
///
/// let window = PageWindow::new(Some(2), 12).unwrap();
/// assert_eq!(window.offset(), 5);
/// assert_eq!(window.num_pages, 3);
/// ```

use crate::error::ApiError;
use serde::{Deserialize, Serialize};

/// Rows per page
pub const PAGE_SIZE: i64 = 5;

/// `?page=N` query parameter
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
}

/// Position of one page within a list of `count` rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub page: i64,
    pub num_pages: i64,
    pub count: i64,
}

impl PageWindow {
    /// Resolves the requested page against the row count
    ///
    /// # Errors
    ///
    /// `ApiError::NotFound` when the page is below 1 or beyond the last page
    pub fn new(requested: Option<i64>, count: i64) -> Result<Self, ApiError> {
        let page = requested.unwrap_or(1);
        let num_pages = num_pages(count);

        if page < 1 || page > num_pages {
            return Err(ApiError::NotFound(format!("Invalid page ({})", page)));
        }

        Ok(Self {
            page,
            num_pages,
            count,
        })
    }

    pub fn limit(&self) -> i64 {
        PAGE_SIZE
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * PAGE_SIZE
    }
}

/// Number of pages for `count` rows; an empty list still has one page
pub fn num_pages(count: i64) -> i64 {
    ((count + PAGE_SIZE - 1) / PAGE_SIZE).max(1)
}

/// One page of results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub results: Vec<T>,
    pub page: i64,
    pub num_pages: i64,
    pub count: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> Page<T> {
    pub fn new(results: Vec<T>, window: PageWindow) -> Self {
        Self {
            results,
            page: window.page,
            num_pages: window.num_pages,
            count: window.count,
            has_next: window.page < window.num_pages,
            has_previous: window.page > 1,
        }
    }
}
