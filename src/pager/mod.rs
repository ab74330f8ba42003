//! Deterministic one-based pagination over a filtered sequence.


use std::num::NonZeroUsize;
use std::ops::Range;

use crate::constants::DEFAULT_PAGE_SIZE;

/// Splits a sequence into contiguous pages of a fixed size.
///
/// Page numbers start at 1. There is always at least one page, even for an
/// empty sequence, and out-of-range page numbers are clamped instead of
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    page_size: NonZeroUsize,
}

impl Default for Pager {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl Pager {
    pub fn new(page_size: NonZeroUsize) -> Self {
        Self { page_size }
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    /// `ceil(len / page_size)`, at least 1.
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size.get()).max(1)
    }

    /// Brings `page` into `1..=total_pages(len)`.
    pub fn clamp_page(&self, page: usize, len: usize) -> usize {
        page.clamp(1, self.total_pages(len))
    }

    /// Index range covered by `page` (after clamping) in a sequence of `len` items.
    pub fn bounds(&self, page: usize, len: usize) -> Range<usize> {
        let page = self.clamp_page(page, len);
        let start = (page - 1) * self.page_size.get();
        let end = (start + self.page_size.get()).min(len);
        start.min(len)..end
    }

    /// Returns the items on `page`.
    pub fn paginate<'s, T>(&self, items: &'s [T], page: usize) -> &'s [T] {
        &items[self.bounds(page, items.len())]
    }
}
