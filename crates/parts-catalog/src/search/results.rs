//! Listing results and pagination.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, SupersessionMatch};
use crate::search::SearchType;

/// Pagination info.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub limit: usize,
    /// Total number of items.
    pub total: usize,
    /// Total number of pages. Zero when there are no items.
    pub total_pages: usize,
    /// Whether there's a next page.
    pub has_more: bool,
}

impl Pagination {
    /// Create pagination info. `page` and `limit` are clamped to at least 1.
    pub fn new(page: usize, limit: usize, total: usize) -> Self {
        let page = page.max(1);
        let limit = limit.max(1);
        let total_pages = total.div_ceil(limit);

        Self {
            page,
            limit,
            total,
            total_pages,
            has_more: page < total_pages,
        }
    }

    /// Index of the first item on this page.
    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Get start item number (1-indexed), or 0 when the page is empty.
    pub fn start_item(&self) -> usize {
        if self.offset() >= self.total {
            0
        } else {
            self.offset() + 1
        }
    }

    /// Get end item number.
    pub fn end_item(&self) -> usize {
        self.page.saturating_mul(self.limit).min(self.total)
    }

    /// Slice the items for this page. Pages past the end are empty.
    pub fn slice<'s, T>(&self, items: &'s [T]) -> &'s [T] {
        let start = self.offset().min(items.len());
        let end = self.page.saturating_mul(self.limit).min(items.len());
        &items[start..end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, crate::search::DEFAULT_LIMIT, 0)
    }
}

/// One page of a product listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage<T = Product> {
    pub products: Vec<T>,
    pub pagination: Pagination,
    pub supersession_match: Option<SupersessionMatch>,
    pub search_type: Option<SearchType>,
}

impl<T> ProductPage<T> {
    /// Create an empty first page.
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            pagination: Pagination::default(),
            supersession_match: None,
            search_type: None,
        }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Number of products on this page.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Map the products, keeping pagination and search metadata.
    pub fn map<U>(self, f: impl FnOnce(Vec<T>) -> Vec<U>) -> ProductPage<U> {
        ProductPage {
            products: f(self.products),
            pagination: self.pagination,
            supersession_match: self.supersession_match,
            search_type: self.search_type,
        }
    }
}
