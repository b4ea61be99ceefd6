//! Page-based and infinite-scroll pagination over a grouped view

use crate::error::ViewError;
use crate::group::GroupedView;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// How successive pages are revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageMode {
    /// One fixed-size slice of the flat item order at a time
    #[default]
    Page,
    /// Everything up to the end of the current page
    Infinite,
}

/// The visible part of a grouped view
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Visible items, regrouped by day
    pub view: GroupedView<T>,
    pub page: usize,
    pub page_size: usize,
    pub mode: PageMode,
    pub total_items: usize,
    pub total_pages: usize,
    /// More items exist past the visible range
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Number of visible items
    pub fn visible_len(&self) -> usize {
        self.view.len()
    }

    pub fn is_first(&self) -> bool {
        self.page == 0
    }

    pub fn is_last(&self) -> bool {
        !self.has_more
    }
}

/// Paginate a grouped view.
///
/// `Page` mode slices `[page * size, page * size + size)` of the flattened
/// display order; a page past the end is empty. `Infinite` mode reveals the
/// prefix up to `(page + 1) * size`, so the visible set only grows as `page`
/// grows.
pub fn paginate<T: Clone>(
    view: &GroupedView<T>,
    page: usize,
    page_size: usize,
    mode: PageMode,
) -> Result<Page<T>, ViewError> {
    let page_size = NonZeroUsize::new(page_size).ok_or(ViewError::ZeroPageSize)?;
    Ok(page_of(view, page, page_size, mode))
}

pub(crate) fn page_of<T: Clone>(
    view: &GroupedView<T>,
    page: usize,
    page_size: NonZeroUsize,
    mode: PageMode,
) -> Page<T> {
    let size = page_size.get();
    let total_items = view.len();
    let total_pages = total_items.div_ceil(size);

    let end = page.saturating_add(1).saturating_mul(size).min(total_items);
    let start = match mode {
        PageMode::Page => page.saturating_mul(size).min(total_items),
        PageMode::Infinite => 0,
    };

    Page {
        view: view.slice(start, end),
        page,
        page_size: size,
        mode,
        total_items,
        total_pages,
        has_more: end < total_items,
    }
}
