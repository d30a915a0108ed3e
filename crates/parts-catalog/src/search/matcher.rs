//! Free-text product matching.
//!
//! A query is first tried as a retired part number. When that misses, each
//! product falls into at most one relevance bucket:
//!
//! 1. exact SKU
//! 2. same base part (variant or parent match)
//! 3. SKU substring
//! 4. description substring
//!
//! Buckets are concatenated in that order and everything else is dropped.

use serde::{Deserialize, Serialize};

use crate::catalog::{base_sku, Product, SupersessionMatch, SupersessionTable};

/// How a search resolved, when it was more than a plain match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    /// The query was a retired SKU and results are its replacements.
    Supersession,
    /// The query named a base part and only its variants matched.
    Variant,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Supersession => "supersession",
            SearchType::Variant => "variant",
        }
    }
}

/// Products kept by a search, in relevance order.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome<'a> {
    pub products: Vec<&'a Product>,
    pub search_type: Option<SearchType>,
    pub supersession_match: Option<SupersessionMatch>,
}

/// Match products against a free-text query.
///
/// A blank query returns every product unchanged with no search type.
pub fn match_products<'a>(
    products: &'a [Product],
    supersessions: &SupersessionTable,
    query: &str,
) -> SearchOutcome<'a> {
    let query = query.trim();
    if query.is_empty() {
        return SearchOutcome {
            products: products.iter().collect(),
            search_type: None,
            supersession_match: None,
        };
    }

    if let Some(hit) = supersessions.resolve(query) {
        let current: Vec<String> = hit.current_skus.iter().map(|s| s.to_uppercase()).collect();
        let matched = products
            .iter()
            .filter(|p| {
                let parent = p.parent_sku.to_uppercase();
                let sku = p.sku.to_uppercase();
                current.iter().any(|c| parent == *c || sku.starts_with(c.as_str()))
            })
            .collect();

        tracing::debug!(old_sku = %hit.old_sku, "search resolved through supersession");
        return SearchOutcome {
            products: matched,
            search_type: Some(SearchType::Supersession),
            supersession_match: Some(hit),
        };
    }

    let upper = query.to_uppercase();
    let lower = query.to_lowercase();
    let base = base_sku(query);

    let mut exact = Vec::new();
    let mut parent = Vec::new();
    let mut sku_substring = Vec::new();
    let mut description = Vec::new();

    for product in products {
        let sku = product.sku.to_uppercase();
        if sku == upper {
            exact.push(product);
        } else if base_sku(&product.sku) == base
            || (!product.parent_sku.is_empty()
                && (base_sku(&product.parent_sku) == base
                    || product.parent_sku.to_uppercase() == upper))
        {
            parent.push(product);
        } else if sku.contains(&upper) {
            sku_substring.push(product);
        } else if product.description.to_lowercase().contains(&lower) {
            description.push(product);
        }
    }

    let search_type = (!parent.is_empty() && exact.is_empty()).then_some(SearchType::Variant);

    tracing::debug!(
        exact = exact.len(),
        parent = parent.len(),
        sku = sku_substring.len(),
        description = description.len(),
        "search buckets"
    );

    let mut matched = exact;
    matched.append(&mut parent);
    matched.append(&mut sku_substring);
    matched.append(&mut description);

    SearchOutcome {
        products: matched,
        search_type,
        supersession_match: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skus(outcome: &SearchOutcome<'_>) -> Vec<String> {
        outcome.products.iter().map(|p| p.sku.clone()).collect()
    }

    #[test]
    fn test_variants_match_parent_bucket() {
        let products = vec![
            Product::new("UB83268A", "UB83268"),
            Product::new("UB83268X", "UB83268"),
            Product::new("UB99999", "UB99999"),
        ];
        let outcome = match_products(&products, &SupersessionTable::new(), "UB83268");

        assert_eq!(skus(&outcome), vec!["UB83268A", "UB83268X"]);
        assert_eq!(outcome.search_type, Some(SearchType::Variant));
    }

    #[test]
    fn test_exact_match_suppresses_variant_tag() {
        let products = vec![
            Product::new("UB83268-A", "UB83268"),
            Product::new("UB83268", "UB83268"),
        ];
        let outcome = match_products(&products, &SupersessionTable::new(), "ub83268");

        assert_eq!(skus(&outcome), vec!["UB83268", "UB83268-A"]);
        assert_eq!(outcome.search_type, None);
    }

    #[test]
    fn test_bucket_order() {
        let products = vec![
            Product::new("ZZ1", "").with_description("Gasket for RH5"),
            Product::new("XRH5-9", ""),
            Product::new("RH5-A", ""),
            Product::new("RH5", ""),
        ];
        let outcome = match_products(&products, &SupersessionTable::new(), "rh5");

        assert_eq!(skus(&outcome), vec!["RH5", "RH5-A", "XRH5-9", "ZZ1"]);
    }

    #[test]
    fn test_supersession_short_circuits() {
        let products = vec![
            Product::new("NEWPART456-A", "NEWPART456"),
            Product::new("NEWPART456B", "OTHER"),
            Product::new("OLDPART123", "OLDPART123"),
            Product::new("UNRELATED", "NEWPART"),
        ];
        let table = SupersessionTable::new().with_entry("OLDPART123", ["NEWPART456"]);
        let outcome = match_products(&products, &table, "oldpart123");

        assert_eq!(skus(&outcome), vec!["NEWPART456-A", "NEWPART456B"]);
        assert_eq!(outcome.search_type, Some(SearchType::Supersession));
        assert_eq!(outcome.supersession_match.unwrap().old_sku, "OLDPART123");
    }

    #[test]
    fn test_blank_query_skips_search() {
        let products = vec![Product::new("A", ""), Product::new("B", "")];
        let outcome = match_products(&products, &SupersessionTable::new(), "  ");

        assert_eq!(outcome.products.len(), 2);
        assert_eq!(outcome.search_type, None);
    }

    #[test]
    fn test_no_match_is_empty() {
        let products = vec![Product::new("A1", "").with_description("Wiper blade")];
        let outcome = match_products(&products, &SupersessionTable::new(), "piston");

        assert!(outcome.products.is_empty());
        assert_eq!(outcome.search_type, None);
    }

    #[test]
    fn test_search_type_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&SearchType::Variant).unwrap(), "\"variant\"");
    }
}
