use serde::{Deserialize, Serialize};

/// Upper bound applied to page sizes coming from request parameters.
pub const MAX_PAGE_SIZE: usize = 500;

/// Offset-based page request for list views and history listings
///
/// # Example
/// ```
/// use stitchtrack_db::repository::pagination::PageRequest;
///
/// let first = PageRequest::new(50, 0);
/// let third = PageRequest::for_page(50, 3);
/// assert_eq!(third.offset, 100);
/// assert_eq!(first.page_number(), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// Maximum number of rows to return
    pub limit: usize,
    /// Number of rows to skip
    pub offset: usize,
}

impl PageRequest {
    pub fn new(limit: usize, offset: usize) -> Self {
        Self {
            limit: limit.min(MAX_PAGE_SIZE),
            offset,
        }
    }

    /// Page request for a 1-based page number; page 0 is treated as page 1.
    pub fn for_page(page_size: usize, page_number: usize) -> Self {
        let page_size = page_size.min(MAX_PAGE_SIZE);
        let page_number = page_number.max(1);
        Self {
            limit: page_size,
            offset: (page_number - 1) * page_size,
        }
    }

    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    /// `LIMIT` bind value for SQLite
    pub fn limit_i64(&self) -> i64 {
        self.limit as i64
    }

    /// `OFFSET` bind value for SQLite
    pub fn offset_i64(&self) -> i64 {
        self.offset as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// One page of rows plus the total row count
///
/// # Example
/// ```
/// use stitchtrack_db::repository::pagination::Page;
///
/// let page = Page::new(vec!["a", "b"], 5, 2, 0);
/// assert!(page.has_more());
/// assert_eq!(page.total_pages(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of rows across all pages
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: usize, limit: usize, offset: usize) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    pub fn has_more(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    pub fn page_number(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            (self.offset / self.limit) + 1
        }
    }

    pub fn total_pages(&self) -> usize {
        if self.limit == 0 {
            1
        } else {
            self.total.div_ceil(self.limit).max(1)
        }
    }

    /// Converts the rows while keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
