//! Product listing query.

use serde::{Deserialize, Serialize};

use crate::search::Filter;

/// Default page size for listings.
pub const DEFAULT_LIMIT: usize = 24;

/// Sort options for listings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum SortOption {
    /// Stock type priority, then stock on hand, then SKU.
    #[default]
    Relevance,
    /// Any other named sort. Leaves the order produced by earlier stages.
    Unsorted(String),
}

impl SortOption {
    pub fn as_str(&self) -> &str {
        match self {
            SortOption::Relevance => "relevance",
            SortOption::Unsorted(name) => name,
        }
    }

    /// Parse a sort name. Blank names mean relevance.
    pub fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("relevance") {
            SortOption::Relevance
        } else {
            SortOption::Unsorted(name.to_string())
        }
    }
}

impl From<String> for SortOption {
    fn from(name: String) -> Self {
        SortOption::from_name(&name)
    }
}

impl From<SortOption> for String {
    fn from(sort: SortOption) -> Self {
        sort.as_str().to_string()
    }
}

/// A product listing request.
///
/// Empty strings and `false` flags switch a stage off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub stock_type: Option<String>,
    pub make: Option<String>,
    pub model: Option<String>,
    pub nla_only: bool,
    pub in_stock_only: bool,
    /// Current page (1-indexed).
    pub page: usize,
    /// Items per page.
    pub limit: usize,
    pub sort: SortOption,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self::new()
    }
}

impl ProductQuery {
    /// Create a query for the first page with the default page size.
    pub fn new() -> Self {
        Self {
            search: None,
            category: None,
            subcategory: None,
            stock_type: None,
            make: None,
            model: None,
            nla_only: false,
            in_stock_only: false,
            page: 1,
            limit: DEFAULT_LIMIT,
            sort: SortOption::Relevance,
        }
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set the category and optional subcategory.
    pub fn with_category(mut self, category: impl Into<String>, subcategory: Option<&str>) -> Self {
        self.category = Some(category.into());
        self.subcategory = subcategory.map(str::to_string);
        self
    }

    /// Set the stock type.
    pub fn with_stock_type(mut self, stock_type: impl Into<String>) -> Self {
        self.stock_type = Some(stock_type.into());
        self
    }

    /// Set the vehicle make.
    pub fn with_make(mut self, make: impl Into<String>) -> Self {
        self.make = Some(make.into());
        self
    }

    /// Set the vehicle model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Only return NLA parts.
    pub fn nla_only(mut self) -> Self {
        self.nla_only = true;
        self
    }

    /// Only return parts in stock.
    pub fn in_stock_only(mut self) -> Self {
        self.in_stock_only = true;
        self
    }

    /// Set the sort.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination. Both values are clamped to at least 1.
    pub fn with_pagination(mut self, page: usize, limit: usize) -> Self {
        self.page = page.max(1);
        self.limit = limit.max(1);
        self
    }

    /// Page number, never below 1.
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Page size, never below 1.
    pub fn limit(&self) -> usize {
        self.limit.max(1)
    }

    /// Trimmed search text, if any.
    pub fn search_text(&self) -> Option<&str> {
        non_empty(&self.search)
    }

    /// Filter stages in pipeline order.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::new();

        if let Some(make) = non_empty(&self.make) {
            filters.push(Filter::make(make));
        }
        if let Some(model) = non_empty(&self.model) {
            filters.push(Filter::model(model));
        }
        // Subcategory only narrows a category; on its own it is ignored.
        if let Some(category) = non_empty(&self.category) {
            filters.push(Filter::category(category, non_empty(&self.subcategory)));
        }
        if let Some(stock_type) = non_empty(&self.stock_type) {
            filters.push(Filter::stock_type(stock_type));
        }
        if self.nla_only {
            filters.push(Filter::NlaOnly);
        }
        if self.in_stock_only {
            filters.push(Filter::InStock);
        }

        filters
    }

    /// Parse a URL query string such as `search=ue1&stockType=Uprated&page=2`.
    ///
    /// Unknown keys are ignored. Unparseable numbers fall back to defaults.
    pub fn from_query_string(query: &str) -> Self {
        let mut parsed = Self::new();
        let query = query.strip_prefix('?').unwrap_or(query);

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value);

            match key {
                "search" => parsed.search = Some(value),
                "category" => parsed.category = Some(value),
                "subcategory" => parsed.subcategory = Some(value),
                "stockType" => parsed.stock_type = Some(value),
                "make" => parsed.make = Some(value),
                "model" => parsed.model = Some(value),
                "nlaOnly" => parsed.nla_only = value == "true",
                "inStockOnly" => parsed.in_stock_only = value == "true",
                "page" => parsed.page = value.parse().unwrap_or(1).max(1),
                "limit" => parsed.limit = value.parse().unwrap_or(DEFAULT_LIMIT).max(1),
                "sort" => parsed.sort = SortOption::from_name(&value),
                _ => {}
            }
        }

        parsed
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn decode(value: &str) -> String {
    let plus_as_space = value.replace('+', " ");
    urlencoding::decode(&plus_as_space)
        .map(|v| v.into_owned())
        .unwrap_or(plus_as_space)
}
