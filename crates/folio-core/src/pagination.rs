//! Listing pagination.
//!
//! Page 1 of the listing always lives at the site root; every later page
//! lives at `/page/{n}`.

use serde::{Deserialize, Serialize};

/// Current position within a paginated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// One-based current page.
    pub current_page: usize,

    /// Total number of pages; zero when there is nothing to list.
    pub total_pages: usize,
}

impl Pagination {
    /// Create a pagination descriptor.
    #[must_use]
    pub const fn new(current_page: usize, total_pages: usize) -> Self {
        Self {
            current_page,
            total_pages,
        }
    }

    /// Descriptor for `page` of a listing holding `count` items.
    #[must_use]
    pub fn for_page(page: usize, count: usize, per_page: usize) -> Self {
        Self::new(page, total_pages(count, per_page))
    }

    /// Whether a "Previous" link is rendered.
    #[must_use]
    pub fn has_prev(&self) -> bool {
        self.current_page.saturating_sub(1) > 0
    }

    /// Whether a "Next" link is rendered.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether the pagination control is rendered at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    /// Target of the "Previous" link.
    #[must_use]
    pub fn prev_href(&self) -> Option<String> {
        self.has_prev().then(|| page_path(self.current_page - 1))
    }

    /// Target of the "Next" link.
    #[must_use]
    pub fn next_href(&self) -> Option<String> {
        self.has_next().then(|| page_path(self.current_page + 1))
    }

    /// Position label, e.g. `1 of 3`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} of {}", self.current_page, self.total_pages)
    }
}

/// Number of pages needed for `count` items.
///
/// A zero page size yields zero pages rather than panicking.
#[must_use]
pub fn total_pages(count: usize, per_page: usize) -> usize {
    if per_page == 0 {
        return 0;
    }
    count.div_ceil(per_page)
}

/// URL path of a listing page.
#[must_use]
pub fn page_path(page: usize) -> String {
    if page <= 1 {
        "/".to_string()
    } else {
        format!("/page/{page}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        assert_eq!(total_pages(10, 4), 3);
        assert_eq!(total_pages(8, 4), 2);
        assert_eq!(total_pages(1, 4), 1);
        assert_eq!(total_pages(0, 4), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_first_page_of_three() {
        let p = Pagination::for_page(1, 10, 4);
        assert_eq!(p.total_pages, 3);
        assert!(!p.has_prev());
        assert!(p.has_next());
        assert!(p.is_visible());
        assert_eq!(p.label(), "1 of 3");
        assert_eq!(p.prev_href(), None);
        assert_eq!(p.next_href().as_deref(), Some("/page/2"));
    }

    #[test]
    fn test_second_page_links_back_to_root() {
        let p = Pagination::new(2, 3);
        assert_eq!(p.prev_href().as_deref(), Some("/"));
        assert_eq!(p.next_href().as_deref(), Some("/page/3"));
    }

    #[test]
    fn test_last_page() {
        let p = Pagination::new(3, 3);
        assert!(p.has_prev());
        assert!(!p.has_next());
        assert_eq!(p.prev_href().as_deref(), Some("/page/2"));
    }

    #[test]
    fn test_hidden_for_single_page() {
        assert!(!Pagination::new(1, 1).is_visible());
        assert!(!Pagination::new(1, 0).is_visible());
    }

    #[test]
    fn test_huge_page_has_no_next() {
        let p = Pagination::new(usize::MAX, 3);
        assert!(!p.has_next());
        assert_eq!(p.next_href(), None);
    }

    #[test]
    fn test_page_path() {
        assert_eq!(page_path(1), "/");
        assert_eq!(page_path(3), "/page/3");
    }

    #[test]
    fn test_prev_next_bounds_for_all_pages() {
        for total in 1..=6 {
            for current in 1..=total {
                let p = Pagination::new(current, total);
                assert_eq!(p.has_prev(), current > 1);
                assert_eq!(p.has_next(), current < total);
            }
        }
    }
}
