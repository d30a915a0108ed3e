//! Reseller availability overlay.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::catalog::{Product, StockType};

/// Whether a reseller can sell a part directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResellerAvailability {
    /// The reseller stocks this line.
    Available,
    /// The customer must ask for a quote.
    SendRequest,
}

impl ResellerAvailability {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResellerAvailability::Available => "available",
            ResellerAvailability::SendRequest => "send_request",
        }
    }

    /// Label shown to customers.
    pub fn label(&self) -> &'static str {
        match self {
            ResellerAvailability::Available => "Available",
            ResellerAvailability::SendRequest => "Send Request",
        }
    }
}

/// A product annotated for a reseller storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResellerProduct {
    #[serde(flatten)]
    pub product: Product,
    pub reseller_availability: ResellerAvailability,
    pub display_availability: String,
}

/// Stock types resellers may sell directly.
pub fn default_flag_set() -> HashSet<StockType> {
    HashSet::from([
        StockType::PrestigeParts,
        StockType::PrestigePartsOe,
        StockType::Uprated,
    ])
}

/// Availability of one product under a flag set.
pub fn availability(product: &Product, flag_set: &HashSet<StockType>) -> ResellerAvailability {
    if flag_set.contains(&product.stock_type) {
        ResellerAvailability::Available
    } else {
        ResellerAvailability::SendRequest
    }
}

/// Annotate every product. Nothing is dropped or reordered.
///
/// Run this on a single page of results, after pagination.
pub fn overlay(products: &[Product], flag_set: &HashSet<StockType>) -> Vec<ResellerProduct> {
    products
        .iter()
        .map(|product| {
            let status = availability(product, flag_set);
            ResellerProduct {
                product: product.clone(),
                reseller_availability: status,
                display_availability: status.label().to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlay_is_total_and_ordered() {
        let products = vec![
            Product::new("A", "").with_stock_type(StockType::OriginalEquipment),
            Product::new("B", "").with_stock_type(StockType::PrestigeParts),
            Product::new("C", "").with_stock_type(StockType::Uprated),
            Product::new("D", ""),
        ];

        let annotated = overlay(&products, &default_flag_set());
        let statuses: Vec<_> = annotated
            .iter()
            .map(|p| (p.product.sku.as_str(), p.reseller_availability))
            .collect();

        assert_eq!(
            statuses,
            vec![
                ("A", ResellerAvailability::SendRequest),
                ("B", ResellerAvailability::Available),
                ("C", ResellerAvailability::Available),
                ("D", ResellerAvailability::SendRequest),
            ]
        );
        assert_eq!(annotated[1].display_availability, "Available");
        assert_eq!(annotated[0].display_availability, "Send Request");
    }

    #[test]
    fn test_custom_flag_set() {
        let products = vec![Product::new("A", "").with_stock_type(StockType::Used)];
        let flags = HashSet::from([StockType::Used]);
        assert_eq!(overlay(&products, &flags)[0].reseller_availability, ResellerAvailability::Available);
    }

    #[test]
    fn test_serializes_flattened() {
        let products = vec![Product::new("A", "P").with_stock_type(StockType::PrestigePartsOe)];
        let value = serde_json::to_value(&overlay(&products, &default_flag_set())[0]).unwrap();

        assert_eq!(value["sku"], "A");
        assert_eq!(value["resellerAvailability"], "available");
        assert_eq!(value["displayAvailability"], "Available");
    }
}
