//! The listing pipeline: search, filter, sort, paginate.

use std::cmp::Ordering;

use crate::catalog::{Catalog, Product};
use crate::search::{match_products, Filter, Pagination, ProductPage, ProductQuery, SortOption};

/// Run a listing query against the catalog.
///
/// No stage fails. Blank fields skip their stage and a page past the end is
/// empty.
pub fn filter_products(catalog: &Catalog, query: &ProductQuery) -> ProductPage {
    filter_products_with(catalog, query, &[])
}

/// Run a listing query with extra filter stages after the query's own.
///
/// The extra stages run before sorting, so pagination counts only what they
/// keep.
pub fn filter_products_with(
    catalog: &Catalog,
    query: &ProductQuery,
    extra: &[Filter],
) -> ProductPage {
    let outcome = match_products(
        catalog.products(),
        catalog.supersessions(),
        query.search_text().unwrap_or_default(),
    );
    let mut products = outcome.products;

    for filter in query.filters().iter().chain(extra) {
        products = filter.apply(products, catalog.fitment());
        tracing::debug!(filter = filter.name(), remaining = products.len(), "filter applied");
    }

    sort_products(&mut products, &query.sort);

    let pagination = Pagination::new(query.page(), query.limit(), products.len());
    let page = pagination.slice(&products).iter().map(|p| (*p).clone()).collect();

    ProductPage {
        products: page,
        pagination,
        supersession_match: outcome.supersession_match,
        search_type: outcome.search_type,
    }
}

/// Sort in place. Only relevance reorders.
pub fn sort_products(products: &mut [&Product], sort: &SortOption) {
    if *sort == SortOption::Relevance {
        products.sort_by(|a, b| relevance(a, b));
    }
}

fn relevance(a: &Product, b: &Product) -> Ordering {
    a.stock_type
        .priority()
        .cmp(&b.stock_type.priority())
        .then_with(|| a.in_stock_rank().cmp(&b.in_stock_rank()))
        .then_with(|| compare_sku(&a.sku, &b.sku))
}

/// Case-folded order first, so `ab1` sorts beside `AB1`, then byte order.
fn compare_sku(a: &str, b: &str) -> Ordering {
    let folded = |s: &str| s.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();
    folded(a).cmp(&folded(b)).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{StockType, SupersessionTable};
    use crate::fitment::{FitmentIndex, FitmentRecord};
    use crate::search::SearchType;

    fn skus(page: &ProductPage) -> Vec<&str> {
        page.products.iter().map(|p| p.sku.as_str()).collect()
    }

    #[test]
    fn test_relevance_sort() {
        let catalog = Catalog::new(
            vec![
                Product::new("C", "").with_stock_type(StockType::OriginalEquipment).with_stock(1, 0, false),
                Product::new("B", "").with_stock_type(StockType::PrestigeParts),
                Product::new("A", "").with_stock_type(StockType::PrestigeParts).with_stock(0, 0, true),
                Product::new("D", "").with_stock_type(StockType::PrestigeParts).with_stock(2, 0, false),
                Product::new("E", "").with_stock_type(StockType::from_name("Mystery")),
            ],
            FitmentIndex::new(),
            SupersessionTable::new(),
        );

        let page = filter_products(&catalog, &ProductQuery::new());
        assert_eq!(skus(&page), vec!["D", "A", "B", "C", "E"]);
    }

    #[test]
    fn test_other_sort_keeps_search_order() {
        let catalog = Catalog::new(
            vec![
                Product::new("ZZ1", "").with_description("rh5 seal"),
                Product::new("RH5", "").with_stock_type(StockType::Bundle),
                Product::new("AA1", "").with_stock_type(StockType::PrestigeParts),
            ],
            FitmentIndex::new(),
            SupersessionTable::new(),
        );

        let query = ProductQuery::new()
            .with_search("rh5")
            .with_sort(SortOption::from_name("price"));
        let page = filter_products(&catalog, &query);
        assert_eq!(skus(&page), vec!["RH5", "ZZ1"]);
    }

    #[test]
    fn test_search_then_make() {
        let catalog = Catalog::new(
            vec![
                Product::new("UB1-A", "UB1"),
                Product::new("UB1-X", "UB1"),
                Product::new("UB2", "UB2").with_description("UB1 bracket"),
            ],
            FitmentIndex::new()
                .with_record("UB1", FitmentRecord::new("Bentley", "Arnage"))
                .with_record("UB2", FitmentRecord::new("Rolls-Royce", "Seraph")),
            SupersessionTable::new(),
        );

        let query = ProductQuery::new().with_search("UB1").with_make("Bentley");
        let page = filter_products(&catalog, &query);

        assert_eq!(skus(&page), vec!["UB1-A", "UB1-X"]);
        assert_eq!(page.search_type, Some(SearchType::Variant));
        assert_eq!(page.pagination.total, 2);
    }

    #[test]
    fn test_relevance_tiebreak_ignores_case() {
        let catalog = Catalog::new(
            vec![
                Product::new("b2", ""),
                Product::new("B1", ""),
                Product::new("a3", ""),
                Product::new("A3", ""),
            ],
            FitmentIndex::new(),
            SupersessionTable::new(),
        );

        let page = filter_products(&catalog, &ProductQuery::new());
        assert_eq!(skus(&page), vec!["A3", "a3", "B1", "b2"]);
    }

    #[test]
    fn test_subcategory_alone_keeps_every_category() {
        let catalog = Catalog::new(
            vec![
                Product::new("A", "").with_categories("Engine/Gaskets"),
                Product::new("B", "").with_categories("Brakes/Pads"),
            ],
            FitmentIndex::new(),
            SupersessionTable::new(),
        );

        let page = filter_products(&catalog, &ProductQuery::from_query_string("subcategory=Gaskets"));
        assert_eq!(page.pagination.total, 2);

        let page = filter_products(
            &catalog,
            &ProductQuery::from_query_string("category=Engine&subcategory=Gaskets"),
        );
        assert_eq!(skus(&page), vec!["A"]);
    }

    #[test]
    fn test_page_beyond_end_is_empty() {
        let catalog = Catalog::new(
            vec![Product::new("A", ""), Product::new("B", "")],
            FitmentIndex::new(),
            SupersessionTable::new(),
        );

        let page = filter_products(&catalog, &ProductQuery::new().with_pagination(5, 1));
        assert!(page.is_empty());
        assert_eq!(page.pagination.total_pages, 2);
        assert!(!page.pagination.has_more);
    }
}
