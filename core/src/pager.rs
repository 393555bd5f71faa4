//! Scroll-to-load-more state for paged lists.
//!
//! A list screen calls [`Pager::begin`] when it hits the bottom, fetches the
//! returned page, then reports back with [`Pager::absorb`] (or
//! [`Pager::abort`] on failure). `begin` refuses while a page is in flight
//! and after the last page.

use crate::types::{PageParams, PageResult};
use crate::types::global::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};

#[derive(Debug, Clone)]
pub struct Pager<T> {
    next_page: u32,
    page_size: u32,
    items: Vec<T>,
    finished: bool,
    loading: bool,
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Pager<T> {
    pub fn new(page_size: u32) -> Self {
        Self {
            next_page: DEFAULT_PAGE,
            page_size: page_size.max(1),
            items: Vec::new(),
            finished: false,
            loading: false,
        }
    }

    /// Params for the next page, marking the pager as loading.
    pub fn begin(&mut self) -> Option<PageParams> {
        if self.finished || self.loading {
            return None;
        }
        self.loading = true;
        Some(PageParams::new(self.next_page, self.page_size))
    }

    pub fn absorb(&mut self, page: PageResult<T>) {
        self.loading = false;
        let last = page.pages.max(1);
        self.finished = page.page >= last || page.items.is_empty();
        self.next_page = page.page.saturating_add(1);
        self.items.extend(page.items);
    }

    /// Release the loading guard without advancing.
    pub fn abort(&mut self) {
        self.loading = false;
    }

    pub fn reset(&mut self) {
        self.next_page = DEFAULT_PAGE;
        self.items.clear();
        self.finished = false;
        self.loading = false;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }
}
