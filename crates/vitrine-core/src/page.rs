//! View window: the paginated slice of the filtered view, its metadata,
//! and the page-number strip.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Default page size, matching the reference UI's select.
pub const DEFAULT_PER_PAGE: usize = 10;

/// Most page numbers the link strip shows contiguously.
const PAGE_WINDOW: usize = 5;

/// Current page and page size.
///
/// Invariant: `current` stays within `[1, max(1, ceil(items / per_page))]`
/// after any change to the view or the page size; the store maintains
/// this by resetting on recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    current: usize,
    per_page: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            current: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl PageState {
    /// Start at page 1 with the given page size (minimum 1).
    pub fn new(per_page: usize) -> Self {
        Self {
            current: 1,
            per_page: per_page.max(1),
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Back to page 1.
    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Change the page size and return to page 1. Zero is ignored.
    pub fn set_per_page(&mut self, per_page: usize) {
        if per_page > 0 {
            self.per_page = per_page;
            self.current = 1;
        }
    }

    /// Move forward one page; no-op on the last page.
    pub fn advance(&mut self, total_pages: usize) {
        if self.current < total_pages {
            self.current += 1;
        }
    }

    /// Move back one page; no-op on the first page.
    pub fn back(&mut self) {
        if self.current > 1 {
            self.current -= 1;
        }
    }

    /// Jump to a page; no-op outside `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize, total_pages: usize) {
        if (1..=total_pages).contains(&page) {
            self.current = page;
        }
    }
}

/// Pagination metadata for the current view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: usize,
    /// Zero when the view is empty.
    pub total_pages: usize,
    pub total_items: usize,
}

impl PageMeta {
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// One entry in the page-number strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    /// An ellipsis between the contiguous window and the first/last page.
    Gap,
}

/// Slice the view down to the current page.
///
/// Never fails: a page past the end yields an empty slice (the store's
/// clamping keeps that from happening in normal operation).
pub fn paginate<'a>(view: &'a [Record], page: &PageState) -> (&'a [Record], PageMeta) {
    let total_items = view.len();
    let total_pages = total_items.div_ceil(page.per_page);
    let start = page
        .current
        .saturating_sub(1)
        .saturating_mul(page.per_page)
        .min(total_items);
    let end = (start + page.per_page).min(total_items);
    (
        &view[start..end],
        PageMeta {
            current_page: page.current,
            total_pages,
            total_items,
        },
    )
}

/// The page-number strip: up to five contiguous numbers centered on the
/// current page, widened at either boundary so a full window shows
/// whenever enough pages exist, with the first and last page always
/// reachable across a gap. Empty when there are no pages.
pub fn page_links(meta: &PageMeta) -> Vec<PageLink> {
    let total = meta.total_pages;
    if total == 0 {
        return Vec::new();
    }
    let current = meta.current_page.clamp(1, total);

    let mut start = current.saturating_sub(2).max(1);
    let mut end = (current + 2).min(total);
    if end - start + 1 < PAGE_WINDOW {
        if start == 1 {
            end = (start + PAGE_WINDOW - 1).min(total);
        } else {
            start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
        }
    }

    let mut links = Vec::new();
    if start > 1 {
        links.push(PageLink::Page(1));
        if start > 2 {
            links.push(PageLink::Gap);
        }
    }
    for page in start..=end {
        links.push(PageLink::Page(page));
    }
    if end < total {
        if end < total - 1 {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(total));
    }
    links
}
