//! Page cursor, page-button window, and range summaries.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Rows per page used when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Page sizes offered by the rows-per-page picker.
pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 5] = [5, 10, 25, 50, 100];

/// Maximum numbered buttons rendered in the page bar (excluding first/last).
pub const MAX_VISIBLE_PAGES: usize = 5;

/// Pagination cursor; pages are 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageState {
    /// Current page number, starting at 1.
    pub page: usize,
    /// Rows per page, always at least 1.
    pub page_size: usize,
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageState {
    /// First page with the given size (a zero size is treated as 1).
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Number of pages needed for `total` rows.
    #[must_use]
    pub const fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// Index range of the current page, clamped to `total`.
    #[must_use]
    pub fn range(&self, total: usize) -> Range<usize> {
        let start = self
            .page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(total);
        let end = start.saturating_add(self.page_size).min(total);
        start..end
    }

    /// Whether `page` can be navigated to for `total` rows (page 1 is always valid).
    #[must_use]
    pub fn accepts(&self, page: usize, total: usize) -> bool {
        page >= 1 && page <= self.page_count(total).max(1)
    }

    /// "Showing X to Y of Z" numbers for the current page.
    #[must_use]
    pub fn summary(&self, total: usize) -> PageSummary {
        let range = self.range(total);
        PageSummary {
            first: if range.is_empty() { 0 } else { range.start + 1 },
            last: range.end,
            total,
        }
    }
}

/// One-based row numbers covered by the current page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageSummary {
    /// First row number on the page (0 when the page is empty).
    pub first: usize,
    /// Last row number on the page.
    pub last: usize,
    /// Total rows after filtering.
    pub total: usize,
}

/// An entry in the page-button bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageItem {
    /// A page button.
    Page {
        /// Page number.
        number: usize,
        /// Whether this is the current page.
        current: bool,
    },
    /// A gap between the first/last page and the centred window.
    Ellipsis,
}

/// Buttons for the page bar: a window of up to `max_visible` pages centred on `current`,
/// plus the first and last page with ellipses where pages are skipped.
#[must_use]
pub fn page_window(current: usize, total_pages: usize, max_visible: usize) -> Vec<PageItem> {
    let max_visible = max_visible.max(1);
    let mut start = current.saturating_sub(max_visible / 2).max(1);
    let end = total_pages.min(start + max_visible - 1);
    if end + 1 < start + max_visible {
        start = (end + 1).saturating_sub(max_visible).max(1);
    }

    let page = |number: usize| PageItem::Page {
        number,
        current: number == current,
    };
    let mut items = Vec::new();
    if start > 1 {
        items.push(page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
    }
    items.extend((start..=end).map(page));
    if end < total_pages {
        if end + 1 < total_pages {
            items.push(PageItem::Ellipsis);
        }
        items.push(page(total_pages));
    }
    items
}

/// Parse jump-to-page input; returns the page only when it is within `1..=total_pages`.
#[must_use]
pub fn parse_page_input(input: &str, total_pages: usize) -> Option<usize> {
    input
        .trim()
        .parse::<usize>()
        .ok()
        .filter(|page| (1..=total_pages).contains(page))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(items: &[PageItem]) -> Vec<Option<usize>> {
        items
            .iter()
            .map(|item| match item {
                PageItem::Page { number, .. } => Some(*number),
                PageItem::Ellipsis => None,
            })
            .collect()
    }

    #[test]
    fn ranges_and_counts() {
        let state = PageState { page: 2, page_size: 10 };
        assert_eq!(state.page_count(25), 3);
        assert_eq!(state.page_count(0), 0);
        assert_eq!(state.range(25), 10..20);
        assert_eq!(PageState { page: 3, page_size: 10 }.range(25), 20..25);
        assert_eq!(PageState { page: 9, page_size: 10 }.range(25), 25..25);
    }

    #[test]
    fn summary_reports_one_based_bounds() {
        let state = PageState { page: 3, page_size: 10 };
        assert_eq!(
            state.summary(25),
            PageSummary {
                first: 21,
                last: 25,
                total: 25
            }
        );
        assert_eq!(PageState::default().summary(0).first, 0);
    }

    #[test]
    fn window_adds_edges_and_ellipses() {
        assert_eq!(
            numbers(&page_window(1, 3, MAX_VISIBLE_PAGES)),
            vec![Some(1), Some(2), Some(3)]
        );
        assert_eq!(
            numbers(&page_window(1, 10, MAX_VISIBLE_PAGES)),
            vec![Some(1), Some(2), Some(3), Some(4), Some(5), None, Some(10)]
        );
        assert_eq!(
            numbers(&page_window(6, 10, MAX_VISIBLE_PAGES)),
            vec![Some(1), None, Some(4), Some(5), Some(6), Some(7), Some(8), None, Some(10)]
        );
        assert_eq!(
            numbers(&page_window(10, 10, MAX_VISIBLE_PAGES)),
            vec![Some(1), None, Some(6), Some(7), Some(8), Some(9), Some(10)]
        );
        assert!(page_window(1, 0, MAX_VISIBLE_PAGES).is_empty());
    }

    #[test]
    fn window_marks_current_page() {
        let items = page_window(2, 4, MAX_VISIBLE_PAGES);
        assert!(items.contains(&PageItem::Page {
            number: 2,
            current: true
        }));
        assert!(items.contains(&PageItem::Page {
            number: 3,
            current: false
        }));
    }

    #[test]
    fn jump_input_is_validated() {
        assert_eq!(parse_page_input(" 3 ", 5), Some(3));
        assert_eq!(parse_page_input("0", 5), None);
        assert_eq!(parse_page_input("6", 5), None);
        assert_eq!(parse_page_input("two", 5), None);
    }

    #[test]
    fn first_page_is_always_accepted() {
        let state = PageState::default();
        assert!(state.accepts(1, 0));
        assert!(!state.accepts(2, 10));
        assert!(state.accepts(2, 11));
        assert!(!state.accepts(0, 11));
    }
}
