//! Product detail and related parts.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{Catalog, Product};
use crate::fitment::FitmentRecord;

/// Default number of related parts.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// A product with the vehicles it fits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDetail {
    #[serde(flatten)]
    pub product: Product,
    pub fitment: Vec<FitmentRecord>,
}

/// Why a part was suggested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RelatedReason {
    /// Shares the main category.
    Category,
    /// Fits a model the requested part fits.
    SameModel,
}

/// A suggested part.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelatedPart {
    #[serde(flatten)]
    pub product: Product,
    pub reason: RelatedReason,
}

impl Catalog {
    /// Look up a product by SKU with its fitment attached.
    pub fn product_by_sku(&self, sku: &str) -> Option<ProductDetail> {
        let product = self.get(sku)?;
        Some(ProductDetail {
            product: product.clone(),
            fitment: self.fitment_for(product).to_vec(),
        })
    }

    /// In-stock parts related to `sku`: same main category first, then parts
    /// fitting the same models. Empty when the SKU is unknown.
    pub fn related_parts(&self, sku: &str, limit: usize) -> Vec<RelatedPart> {
        let Some(current) = self.get(sku) else {
            return Vec::new();
        };

        let mut related = Vec::new();
        let mut seen: HashSet<String> = HashSet::from([current.sku.to_uppercase()]);

        let mut push = |product: &Product, reason: RelatedReason, related: &mut Vec<RelatedPart>| {
            if related.len() < limit && seen.insert(product.sku.to_uppercase()) {
                related.push(RelatedPart {
                    product: product.clone(),
                    reason,
                });
            }
        };

        if let Some(main) = current.categories.split('/').next().filter(|c| !c.is_empty()) {
            for product in self
                .products()
                .iter()
                .filter(|p| p.is_in_stock() && p.categories.starts_with(main))
            {
                push(product, RelatedReason::Category, &mut related);
            }
        }

        let parent = current.fitment_key();
        let models: HashSet<&str> = self
            .fitment()
            .records(parent)
            .iter()
            .map(|r| r.model.as_str())
            .collect();

        if related.len() < limit && !models.is_empty() {
            for (other_parent, records) in self.fitment().iter() {
                if other_parent == parent || !records.iter().any(|r| models.contains(r.model.as_str())) {
                    continue;
                }
                for product in self
                    .products()
                    .iter()
                    .filter(|p| p.parent_sku == other_parent && p.is_in_stock())
                {
                    push(product, RelatedReason::SameModel, &mut related);
                }
            }
        }

        tracing::debug!(sku = %current.sku, related = related.len(), "related parts");
        related
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SupersessionTable;
    use crate::fitment::FitmentIndex;

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Product::new("UE1-A", "UE1").with_categories("Engine/Gaskets").with_stock(1, 0, false),
                Product::new("UE2", "UE2").with_categories("Engine/Pistons").with_stock(0, 2, false),
                Product::new("UE3", "UE3").with_categories("Engine/Pistons"),
                Product::new("UB1", "UB1").with_categories("Brakes/Pads").with_stock(0, 0, true),
                Product::new("UB2", "UB2").with_categories("Brakes/Discs").with_stock(4, 0, false),
            ],
            FitmentIndex::new()
                .with_record("UE1", FitmentRecord::new("Bentley", "Arnage"))
                .with_record("UB1", FitmentRecord::new("Bentley", "Arnage"))
                .with_record("UB2", FitmentRecord::new("Bentley", "Azure")),
            SupersessionTable::new(),
        )
    }

    #[test]
    fn test_product_by_sku_attaches_parent_fitment() {
        let detail = catalog().product_by_sku("ue1-a").unwrap();
        assert_eq!(detail.product.sku, "UE1-A");
        assert_eq!(detail.fitment.len(), 1);
        assert!(catalog().product_by_sku("NOPE").is_none());
    }

    #[test]
    fn test_related_category_then_model() {
        let related = catalog().related_parts("UE1-A", 4);
        let found: Vec<_> = related.iter().map(|r| (r.product.sku.as_str(), r.reason)).collect();

        assert_eq!(
            found,
            vec![("UE2", RelatedReason::Category), ("UB1", RelatedReason::SameModel)]
        );
    }

    #[test]
    fn test_related_respects_limit_and_unknown() {
        assert_eq!(catalog().related_parts("UE1-A", 1).len(), 1);
        assert!(catalog().related_parts("MISSING", 4).is_empty());
    }

    #[test]
    fn test_related_reason_serializes_kebab_case() {
        assert_eq!(serde_json::to_string(&RelatedReason::SameModel).unwrap(), "\"same-model\"");
    }
}
