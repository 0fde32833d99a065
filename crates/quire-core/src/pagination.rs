//! Page requests and results for list operations.

use serde::Serialize;

use crate::error::DomainError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const MAX_PAGE_SIZE: u64 = 100;

/// 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub page_size: u64,
}

impl PageRequest {
    /// `page_size` is clamped to `1..=MAX_PAGE_SIZE`. `page` is kept as given
    /// so that out-of-range pages can be rejected.
    pub fn new(page: u64, page_size: u64) -> Self {
        Self {
            page,
            page_size: page_size.clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn first(page_size: u64) -> Self {
        Self::new(1, page_size)
    }

    /// Number of rows to skip. Saturates for absurd page numbers.
    pub fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }

    /// Whether this page exists for `total` matching rows. Page 1 always does.
    /// Stores check this before fetching so out-of-range pages never reach
    /// offset arithmetic.
    pub fn is_within(&self, total: u64) -> bool {
        self.page >= 1 && self.page <= page_count(total, self.page_size)
    }
}

/// Pages needed for `total` rows; an empty result still has one (empty) page.
fn page_count(total: u64, page_size: u64) -> u64 {
    total.div_ceil(page_size.max(1)).max(1)
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of results plus the total row count under the same predicate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub page_size: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }

    pub fn num_pages(&self) -> u64 {
        page_count(self.total, self.page_size)
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.num_pages()).then(|| self.page + 1)
    }

    pub fn previous_page(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    /// Reject page 0 and pages past the end.
    pub fn ensure_in_range(self) -> Result<Self, DomainError> {
        if self.page == 0 || self.page > self.num_pages() {
            return Err(DomainError::InvalidPage(self.page));
        }
        Ok(self)
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_size_is_clamped() {
        assert_eq!(PageRequest::new(1, 0).page_size, 1);
        assert_eq!(PageRequest::new(1, 10_000).page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(1, 20).offset(), 0);
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
        assert_eq!(PageRequest::new(u64::MAX, 100).offset(), u64::MAX);
    }

    #[test]
    fn test_is_within() {
        assert!(PageRequest::new(1, 20).is_within(0));
        assert!(PageRequest::new(3, 20).is_within(42));
        assert!(!PageRequest::new(4, 20).is_within(42));
        assert!(!PageRequest::new(0, 20).is_within(42));
        assert!(!PageRequest::new(1_000_000_000_000_000_000, 20).is_within(42));
    }

    #[test]
    fn test_navigation() {
        let page = Page::new(vec![1, 2], 42, PageRequest::new(2, 20));
        assert_eq!(page.num_pages(), 3);
        assert_eq!(page.next_page(), Some(3));
        assert_eq!(page.previous_page(), Some(1));

        let last = Page::new(vec![1, 2], 42, PageRequest::new(3, 20));
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn test_empty_first_page_is_valid() {
        let page: Page<u8> = Page::new(vec![], 0, PageRequest::default());
        assert!(page.ensure_in_range().is_ok());
    }

    #[test]
    fn test_out_of_range_pages_are_rejected() {
        let zero: Page<u8> = Page::new(vec![], 5, PageRequest::new(0, 20));
        assert!(matches!(
            zero.ensure_in_range(),
            Err(DomainError::InvalidPage(0))
        ));

        let past_end: Page<u8> = Page::new(vec![], 5, PageRequest::new(2, 20));
        assert!(past_end.ensure_in_range().is_err());
    }
}
