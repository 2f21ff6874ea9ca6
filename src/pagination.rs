//! This modules defines the common functionality for paging data.

use serde::Serialize;

/// The config for pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    /// The number of transactions to display per page.
    pub page_size: usize,
    /// The maximum number of pages to show in the pagination indicator.
    pub max_pages: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            max_pages: 5,
        }
    }
}

/// One page of items.
#[derive(Debug, PartialEq)]
pub struct Page<'a, T> {
    /// The items on the requested page, empty if the page is past the end.
    pub items: &'a [T],
    /// The number of pages needed to show every item, at least 1.
    pub total_pages: usize,
}

/// Get page `page` (counting from 1) of `items` with `page_size` items per page.
///
/// A page past the end is empty rather than an error; callers are expected to
/// stop forward navigation at `total_pages`. A page size of zero is treated as one.
pub fn paginate<T>(items: &[T], page: usize, page_size: usize) -> Page<'_, T> {
    let page_size = page_size.max(1);
    let total_pages = page_count(items.len(), page_size);

    let start = page
        .max(1)
        .saturating_sub(1)
        .saturating_mul(page_size)
        .min(items.len());
    let end = start.saturating_add(page_size).min(items.len());

    Page {
        items: &items[start..end],
        total_pages,
    }
}

/// The number of pages needed for `item_count` items, at least 1.
pub fn page_count(item_count: usize, page_size: usize) -> usize {
    item_count.div_ceil(page_size.max(1)).max(1)
}

/// The page the user is currently looking at.
///
/// The current page is not clamped when the number of pages shrinks, e.g.
/// after deleting transactions. Navigation is simply unavailable past the
/// bounds, see [Pagination::next].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// The current page, counting from 1.
    pub current_page: usize,
    /// The number of items per page.
    pub items_per_page: usize,
}

impl Pagination {
    /// Start on the first page with `items_per_page` items per page.
    pub fn new(items_per_page: usize) -> Self {
        Self {
            current_page: 1,
            items_per_page: items_per_page.max(1),
        }
    }

    /// Go back one page, unless already on the first page.
    pub fn prev(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Go forward one page, unless already on or past the last page.
    pub fn next(&mut self, total_pages: usize) {
        if self.current_page < total_pages {
            self.current_page += 1;
        }
    }

    /// Jump to `page`, pages below 1 go to the first page.
    pub fn set(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Go back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }
}

/// One element of the page links shown under a list.
#[derive(Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "page", rename_all = "camelCase")]
pub enum PaginationIndicator {
    /// A link to a page.
    Page(usize),
    /// The page being shown.
    CurrPage(usize),
    /// Skipped pages.
    Ellipsis,
    /// A link to the next page.
    NextButton(usize),
    /// A link to the previous page.
    BackButton(usize),
}

/// Create the page links for `curr_page` of `page_count` pages, showing at
/// most `max_pages` numbered pages around the current page.
pub fn create_pagination_indicators(
    curr_page: usize,
    page_count: usize,
    max_pages: usize,
) -> Vec<PaginationIndicator> {
    let map_page = |page| {
        if page == curr_page {
            PaginationIndicator::CurrPage(page)
        } else {
            PaginationIndicator::Page(page)
        }
    };

    let mut indicators: Vec<PaginationIndicator> = if page_count <= max_pages {
        (1..=page_count).map(map_page).collect()
    } else if curr_page <= (max_pages / 2) {
        (1..=max_pages).map(map_page).collect()
    } else if curr_page > (page_count - max_pages / 2) {
        ((page_count - max_pages + 1)..=page_count)
            .map(map_page)
            .collect()
    } else {
        ((curr_page - max_pages / 2)..=(curr_page + max_pages / 2))
            .map(map_page)
            .collect()
    };

    if page_count > max_pages {
        if curr_page > (max_pages / 2) + 1 {
            indicators.insert(0, PaginationIndicator::Page(1));
            indicators.insert(1, PaginationIndicator::Ellipsis);
        }

        if curr_page < (page_count - max_pages / 2) {
            indicators.push(PaginationIndicator::Ellipsis);
            indicators.push(PaginationIndicator::Page(page_count));
        }
    }

    if curr_page > 1 {
        indicators.insert(0, PaginationIndicator::BackButton(curr_page - 1));
    }

    if curr_page < page_count {
        indicators.push(PaginationIndicator::NextButton(curr_page + 1));
    }

    indicators
}
