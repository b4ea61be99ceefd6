//! Pagination cursor

use crate::error::ViewError;
use crate::group::GroupedView;
use crate::paginate::{page_of, Page, PageMode};
use std::num::NonZeroUsize;

/// Current page of a list view.
///
/// In infinite mode the cursor only moves forward; [`PageCursor::reset`] is
/// the one way back to the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageCursor {
    page: usize,
    page_size: NonZeroUsize,
    mode: PageMode,
}

impl PageCursor {
    pub fn new(page_size: usize, mode: PageMode) -> Result<Self, ViewError> {
        let page_size = NonZeroUsize::new(page_size).ok_or(ViewError::ZeroPageSize)?;
        Ok(Self {
            page: 0,
            page_size,
            mode,
        })
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size.get()
    }

    pub fn mode(&self) -> PageMode {
        self.mode
    }

    /// Advance if another page exists. Returns whether the cursor moved.
    pub fn next(&mut self, total_items: usize) -> bool {
        let revealed = (self.page + 1).saturating_mul(self.page_size.get());
        if revealed < total_items {
            self.page += 1;
            true
        } else {
            false
        }
    }

    /// Step back one page. Never moves in infinite mode.
    pub fn prev(&mut self) -> bool {
        if self.mode == PageMode::Infinite || self.page == 0 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// Back to the first page (view reload or filter change)
    pub fn reset(&mut self) {
        self.page = 0;
    }

    /// Pull the cursor back onto the last page after the collection shrank.
    ///
    /// Only applies in page mode; an infinite cursor is left alone and simply
    /// reveals everything that is left.
    pub fn clamp(&mut self, total_items: usize) {
        if self.mode == PageMode::Page {
            let last = total_items.div_ceil(self.page_size.get()).saturating_sub(1);
            self.page = self.page.min(last);
        }
    }

    /// Visible page of `view` at the cursor
    pub fn apply<T: Clone>(&self, view: &GroupedView<T>) -> Page<T> {
        page_of(view, self.page, self.page_size, self.mode)
    }
}
