//! crates/quran_browser_core/src/pagination.rs
//!
//! Client-side paging over an already fully fetched catalog.

use std::num::NonZeroUsize;

/// Surahs shown per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(30) {
    Some(size) => size,
    None => unreachable!(),
};

/// Tracks how many pages of the catalog are visible.
///
/// Pages only accumulate: page `n` shows the first `n * page_size` items, so the
/// visible prefix never shrinks while the session advances.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page_number: NonZeroUsize,
    page_size: NonZeroUsize,
}

/// The visible prefix of a catalog for one pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow<'a, T> {
    pub page_number: usize,
    pub page_size: usize,
    pub total: usize,
    pub items: &'a [T],
    pub has_more: bool,
}

impl Pagination {
    /// Starts at page 1.
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self::at_page(NonZeroUsize::MIN, page_size)
    }

    /// A controller already advanced to `page_number`.
    pub fn at_page(page_number: NonZeroUsize, page_size: NonZeroUsize) -> Self {
        Self {
            page_number,
            page_size,
        }
    }

    pub fn page_number(&self) -> usize {
        self.page_number.get()
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    fn requested(&self) -> usize {
        self.page_number.get().saturating_mul(self.page_size.get())
    }

    /// `min(page_number * page_size, len)`.
    pub fn visible_count(&self, len: usize) -> usize {
        self.requested().min(len)
    }

    pub fn visible_slice<'a, T>(&self, catalog: &'a [T]) -> &'a [T] {
        &catalog[..self.visible_count(catalog.len())]
    }

    /// Whether a "load more" affordance should be offered.
    pub fn has_more<T>(&self, catalog: &[T]) -> bool {
        self.requested() < catalog.len()
    }

    /// Moves to the next page. The caller re-renders.
    pub fn advance(&mut self) {
        self.page_number = self.page_number.saturating_add(1);
    }

    pub fn window<'a, T>(&self, catalog: &'a [T]) -> PageWindow<'a, T> {
        PageWindow {
            page_number: self.page_number(),
            page_size: self.page_size(),
            total: catalog.len(),
            items: self.visible_slice(catalog),
            has_more: self.has_more(catalog),
        }
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
