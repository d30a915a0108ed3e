//! Product filter predicates.

use serde::{Deserialize, Serialize};

use crate::catalog::{Product, StockType};
use crate::fitment::FitmentIndex;

/// A filter stage in the search pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Filter {
    /// Parent SKU has fitment for this make (exact).
    Make(String),
    /// Parent SKU has fitment for this model (exact).
    Model(String),
    /// Case-insensitive substring of the category path.
    Category(String),
    /// Case-insensitive stock type name.
    StockType(String),
    /// Stock type is one of a fixed set.
    StockTypeIn(Vec<StockType>),
    /// Only parts no longer available from the manufacturer.
    NlaOnly,
    /// Only parts with stock on hand, arriving, or flagged in stock.
    InStock,
}

impl Filter {
    /// Create a make filter.
    pub fn make(make: impl Into<String>) -> Self {
        Filter::Make(make.into())
    }

    /// Create a model filter.
    pub fn model(model: impl Into<String>) -> Self {
        Filter::Model(model.into())
    }

    /// Create a category filter, narrowed to a subcategory when one is given.
    pub fn category(category: &str, subcategory: Option<&str>) -> Self {
        match subcategory.filter(|s| !s.is_empty()) {
            Some(sub) => Filter::Category(format!("{category}/{sub}")),
            None => Filter::Category(category.to_string()),
        }
    }

    /// Create a stock type filter.
    pub fn stock_type(stock_type: impl Into<String>) -> Self {
        Filter::StockType(stock_type.into())
    }

    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Make(_) => "make",
            Filter::Model(_) => "model",
            Filter::Category(_) => "category",
            Filter::StockType(_) => "stock_type",
            Filter::StockTypeIn(_) => "stock_type_in",
            Filter::NlaOnly => "nla",
            Filter::InStock => "in_stock",
        }
    }

    /// Retain the products this filter accepts, preserving order.
    pub fn apply<'a>(&self, products: Vec<&'a Product>, fitment: &FitmentIndex) -> Vec<&'a Product> {
        match self {
            Filter::Make(make) => {
                let parents = fitment.parent_skus_for_make(make);
                retain(products, |p| parents.contains(p.parent_sku.as_str()))
            }
            Filter::Model(model) => {
                let parents = fitment.parent_skus_for_model(model);
                retain(products, |p| parents.contains(p.parent_sku.as_str()))
            }
            Filter::Category(needle) => {
                let needle = needle.to_lowercase();
                retain(products, |p| p.categories.to_lowercase().contains(&needle))
            }
            Filter::StockType(name) => retain(products, |p| p.stock_type.matches(name)),
            Filter::StockTypeIn(types) => retain(products, |p| types.contains(&p.stock_type)),
            Filter::NlaOnly => retain(products, Product::is_nla),
            Filter::InStock => retain(products, Product::is_in_stock),
        }
    }
}

fn retain<'a>(products: Vec<&'a Product>, keep: impl Fn(&Product) -> bool) -> Vec<&'a Product> {
    products.into_iter().filter(|p| keep(*p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fitment::FitmentRecord;

    fn skus(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.sku.clone()).collect()
    }

    #[test]
    fn test_make_filter_uses_parent_sku() {
        let fitment = FitmentIndex::new().with_record("PARENT1", FitmentRecord::new("Bentley", "Arnage"));
        let products = vec![Product::new("A1", "PARENT1"), Product::new("B1", "PARENT2")];

        let kept = Filter::make("Bentley").apply(products.iter().collect(), &fitment);
        assert_eq!(skus(&kept), vec!["A1"]);
    }

    #[test]
    fn test_category_with_subcategory() {
        let products = vec![
            Product::new("A", "").with_categories("Engine/Gaskets"),
            Product::new("B", "").with_categories("Engine/Pistons|Gaskets"),
        ];
        let fitment = FitmentIndex::new();

        let kept = Filter::category("engine", Some("gaskets")).apply(products.iter().collect(), &fitment);
        assert_eq!(skus(&kept), vec!["A"]);

        let kept = Filter::category("Gaskets", None).apply(products.iter().collect(), &fitment);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_stock_type_filter_ignores_case() {
        let products = vec![
            Product::new("A", "").with_stock_type(StockType::PrestigeParts),
            Product::new("B", "").with_stock_type(StockType::PrestigePartsOe),
        ];
        let kept = Filter::stock_type("PRESTIGE PARTS").apply(products.iter().collect(), &FitmentIndex::new());
        assert_eq!(skus(&kept), vec!["A"]);
    }

    #[test]
    fn test_stock_type_set() {
        let products = vec![
            Product::new("A", "").with_stock_type(StockType::Uprated),
            Product::new("B", "").with_stock_type(StockType::Used),
            Product::new("C", "").with_stock_type(StockType::PrestigePartsOe),
        ];
        let filter = Filter::StockTypeIn(vec![StockType::PrestigePartsOe, StockType::Uprated]);

        let kept = filter.apply(products.iter().collect(), &FitmentIndex::new());
        assert_eq!(skus(&kept), vec!["A", "C"]);
    }

    #[test]
    fn test_nla_and_in_stock() {
        let products = vec![
            Product::new("A", "").with_nla_date("2019-01-01"),
            Product::new("B", "").with_stock(0, 0, true),
            Product::new("C", ""),
        ];
        let fitment = FitmentIndex::new();

        let nla = Filter::NlaOnly.apply(products.iter().collect(), &fitment);
        assert_eq!(skus(&nla), vec!["A"]);

        let stocked = Filter::InStock.apply(products.iter().collect(), &fitment);
        assert_eq!(skus(&stocked), vec!["B"]);
    }
}
