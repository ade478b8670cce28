//! Pagination Contract
//!
//! Request/response shapes exchanged with the remote data source, and the
//! view model the pagination control renders from.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// One page request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub page_index: usize,
    pub page_size: usize,
    pub search_term: String,
    pub status_filter: Option<String>,
    pub category_filter: Option<String>,
}

impl PageRequest {
    pub fn first(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size: page_size.max(1),
            search_term: String::new(),
            status_filter: None,
            category_filter: None,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first(DEFAULT_PAGE_SIZE)
    }
}

/// One page of records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total_pages: usize,
    pub total_elements: usize,
}

impl<T> PageResult<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_pages: 0,
            total_elements: 0,
        }
    }
}

impl<T> Default for PageResult<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// What the pagination control should render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationView {
    /// Page indices to render as links
    pub pages: Vec<usize>,
    pub current: usize,
    pub previous_enabled: bool,
    pub next_enabled: bool,
}

impl PaginationView {
    /// Returns `None` when there is at most one page; nothing is rendered then.
    pub fn new(page_index: usize, total_pages: usize) -> Option<Self> {
        if total_pages <= 1 {
            return None;
        }
        let current = page_index.min(total_pages - 1);
        Some(Self {
            pages: (0..total_pages).collect(),
            current,
            previous_enabled: current > 0,
            next_enabled: current + 1 < total_pages,
        })
    }

    /// 1-based label for a page link
    pub fn label(index: usize) -> String {
        (index + 1).to_string()
    }
}

/// Whether `index` is a page the source can serve.
/// Any index is allowed while the page count is unknown or zero.
pub fn is_navigable(index: usize, total_pages: Option<usize>) -> bool {
    match total_pages {
        None | Some(0) => index == 0,
        Some(total) => index < total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_controls_for_single_page() {
        assert_eq!(PaginationView::new(0, 0), None);
        assert_eq!(PaginationView::new(0, 1), None);
    }

    #[test]
    fn test_last_page_disables_next() {
        let view = PaginationView::new(2, 3).unwrap();
        assert_eq!(view.pages, vec![0, 1, 2]);
        assert!(view.previous_enabled);
        assert!(!view.next_enabled);
    }

    #[test]
    fn test_first_page_disables_previous() {
        let view = PaginationView::new(0, 4).unwrap();
        assert!(!view.previous_enabled);
        assert!(view.next_enabled);
        assert_eq!(PaginationView::label(0), "1");
    }

    #[test]
    fn test_navigable_pages() {
        assert!(is_navigable(0, None));
        assert!(is_navigable(0, Some(0)));
        assert!(!is_navigable(1, Some(0)));
        assert!(is_navigable(2, Some(3)));
        assert!(!is_navigable(3, Some(3)));
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let json = serde_json::to_value(PageRequest::first(25)).unwrap();
        assert_eq!(json["pageSize"], 25);
        assert_eq!(json["pageIndex"], 0);
    }
}
