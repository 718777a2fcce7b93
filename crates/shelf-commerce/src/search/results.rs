//! Paged results.

use serde::{Deserialize, Serialize};

/// One page of a server-paginated listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Current page (1-indexed).
    pub page: u32,
    /// Total pages reported by the server; at least 1.
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, total_pages: u32) -> Self {
        Self {
            items,
            page: page.max(1),
            total_pages: total_pages.max(1),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::new(Vec::new(), 1, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page() {
        let page = Page::new(vec![1, 2, 3], 1, 1);
        assert!(!page.has_next());
        assert!(!page.has_prev());
        assert_eq!(page.len(), 3);
    }

    #[test]
    fn test_middle_page() {
        let page = Page::new(vec!["a"], 2, 3);
        assert!(page.has_next());
        assert!(page.has_prev());
    }

    #[test]
    fn test_zero_total_pages_clamped() {
        let page: Page<u8> = Page::new(Vec::new(), 0, 0);
        assert_eq!(page.page, 1);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_empty());
    }

    #[test]
    fn test_map_keeps_paging() {
        let page = Page::new(vec![1, 2], 2, 4).map(|n| n * 10);
        assert_eq!(page.items, vec![10, 20]);
        assert_eq!(page.page, 2);
        assert_eq!(page.total_pages, 4);
    }
}
