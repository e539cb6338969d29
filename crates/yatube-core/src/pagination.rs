//! Page-number pagination
//!
//! The requested page comes straight from the query string and is never
//! trusted: anything that is not an integer selects the first page, and an
//! integer outside `1..=num_pages` selects the last page. Paginating never
//! fails.

use serde::Serialize;

/// Splits an ordered result set into fixed-size pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    per_page: usize,
}

impl Paginator {
    /// # Panics
    /// Panics if `per_page` is zero
    pub fn new(per_page: usize) -> Self {
        assert!(per_page > 0, "per_page must be positive");
        Self { per_page }
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Number of pages for `total` items; an empty set still has one page
    pub fn num_pages(&self, total: u64) -> u64 {
        if total == 0 {
            1
        } else {
            total.div_ceil(self.per_page as u64)
        }
    }

    /// Resolve the raw `page` parameter against `total` items
    pub fn resolve(&self, total: u64, requested: Option<&str>) -> PageWindow {
        let num_pages = self.num_pages(total);
        let number = match requested.map(str::trim).map(str::parse::<i64>) {
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n >= 1 && (n as u64) <= num_pages => n as u64,
            Some(Ok(_)) => num_pages,
        };

        PageWindow {
            number,
            num_pages,
            total,
            per_page: self.per_page,
        }
    }
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(10)
    }
}

/// A resolved page position, ready to become `LIMIT/OFFSET`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: usize,
}

impl PageWindow {
    #[inline]
    pub fn offset(&self) -> u64 {
        (self.number - 1) * self.per_page as u64
    }

    #[inline]
    pub fn limit(&self) -> u64 {
        self.per_page as u64
    }

    #[inline]
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    #[inline]
    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    /// Attach the fetched items
    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page {
            items,
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            per_page: self.per_page,
        }
    }
}

/// One page of results with its position in the whole set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: u64,
    pub num_pages: u64,
    pub total: u64,
    pub per_page: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.number < self.num_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Transform the items, keeping the page metadata
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            number: self.number,
            num_pages: self.num_pages,
            total: self.total,
            per_page: self.per_page,
        }
    }
}
