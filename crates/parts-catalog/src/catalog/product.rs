//! Product and stock type definitions.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Inventory category of a product.
///
/// Known names rank ahead of unknown ones when sorting by relevance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum StockType {
    PrestigeParts,
    PrestigePartsOe,
    Uprated,
    OriginalEquipment,
    Aftermarket,
    /// Legacy spelling of [`StockType::Aftermarket`], kept so the name round-trips.
    AftermarketProduct,
    ReconditionedExchange,
    Used,
    Rebuilt,
    Bundle,
    /// Any name not in the table, including the empty string.
    Other(String),
    #[default]
    Unspecified,
}

impl StockType {
    /// Priority used as a sort tiebreaker. Lower ranks first, unknown types rank 99.
    pub fn priority(&self) -> u8 {
        match self {
            StockType::PrestigeParts => 1,
            StockType::PrestigePartsOe => 2,
            StockType::Uprated => 3,
            StockType::OriginalEquipment => 10,
            StockType::Aftermarket | StockType::AftermarketProduct => 11,
            StockType::ReconditionedExchange => 12,
            StockType::Used => 13,
            StockType::Rebuilt => 14,
            StockType::Bundle => 15,
            StockType::Other(_) | StockType::Unspecified => 99,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            StockType::PrestigeParts => "Prestige Parts",
            StockType::PrestigePartsOe => "Prestige Parts (OE)",
            StockType::Uprated => "Uprated",
            StockType::OriginalEquipment => "Original Equipment",
            StockType::Aftermarket => "Aftermarket",
            StockType::AftermarketProduct => "Aftermarket Product",
            StockType::ReconditionedExchange => "Reconditioned Exchange",
            StockType::Used => "Used",
            StockType::Rebuilt => "Rebuilt",
            StockType::Bundle => "Bundle",
            StockType::Other(name) => name,
            StockType::Unspecified => "",
        }
    }

    /// Parse a stock type name. Matching is exact, as in the exported data.
    pub fn from_name(name: &str) -> Self {
        match name {
            "Prestige Parts" => StockType::PrestigeParts,
            "Prestige Parts (OE)" => StockType::PrestigePartsOe,
            "Uprated" => StockType::Uprated,
            "Original Equipment" => StockType::OriginalEquipment,
            "Aftermarket" => StockType::Aftermarket,
            "Aftermarket Product" => StockType::AftermarketProduct,
            "Reconditioned Exchange" => StockType::ReconditionedExchange,
            "Used" => StockType::Used,
            "Rebuilt" => StockType::Rebuilt,
            "Bundle" => StockType::Bundle,
            "" => StockType::Unspecified,
            other => StockType::Other(other.to_string()),
        }
    }

    /// Case-insensitive comparison against a filter value.
    pub fn matches(&self, name: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(name)
    }
}

impl From<String> for StockType {
    fn from(name: String) -> Self {
        StockType::from_name(&name)
    }
}

impl From<StockType> for String {
    fn from(stock_type: StockType) -> Self {
        stock_type.as_str().to_string()
    }
}

impl fmt::Display for StockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A sellable unit in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stock keeping unit (unique).
    pub sku: String,
    /// Base part this SKU is a variant of.
    #[serde(default, deserialize_with = "null_default")]
    pub parent_sku: String,
    #[serde(default, deserialize_with = "null_default")]
    pub description: String,
    /// Price in the source currency.
    #[serde(default, deserialize_with = "null_default")]
    pub price: f64,
    /// Weight in kilograms.
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default, deserialize_with = "null_default")]
    pub stock_type: StockType,
    /// `/`-separated hierarchy, `|`-separated when a product sits in several.
    #[serde(default, deserialize_with = "null_default")]
    pub categories: String,
    #[serde(default, deserialize_with = "null_default")]
    pub in_stock: bool,
    #[serde(default, deserialize_with = "null_default")]
    pub available_now: i64,
    #[serde(default, rename = "available1to3Days", deserialize_with = "null_default")]
    pub available_1to3_days: i64,
    /// Set when the manufacturer no longer supplies the part.
    #[serde(default)]
    pub nla_date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Other part numbers this product is also known as.
    #[serde(default, deserialize_with = "null_default", skip_serializing_if = "Vec::is_empty")]
    pub supersessions: Vec<String>,
}

impl Product {
    /// Create a product with just a SKU and parent SKU.
    pub fn new(sku: impl Into<String>, parent_sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            parent_sku: parent_sku.into(),
            ..Default::default()
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the stock type.
    pub fn with_stock_type(mut self, stock_type: StockType) -> Self {
        self.stock_type = stock_type;
        self
    }

    /// Set the category path.
    pub fn with_categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = categories.into();
        self
    }

    /// Set stock levels.
    pub fn with_stock(mut self, available_now: i64, available_1to3_days: i64, in_stock: bool) -> Self {
        self.available_now = available_now;
        self.available_1to3_days = available_1to3_days;
        self.in_stock = in_stock;
        self
    }

    /// Set the price.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Set the weight in kilograms.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    /// Mark the part as no longer available.
    pub fn with_nla_date(mut self, date: impl Into<String>) -> Self {
        self.nla_date = Some(date.into());
        self
    }

    /// Whether any stock is on hand, arriving soon, or flagged in stock.
    pub fn is_in_stock(&self) -> bool {
        self.available_now > 0 || self.available_1to3_days > 0 || self.in_stock
    }

    /// 0 when stock is on hand or arriving within three days, else 1.
    pub fn in_stock_rank(&self) -> u8 {
        if self.available_now > 0 || self.available_1to3_days > 0 {
            0
        } else {
            1
        }
    }

    /// Whether the part has an NLA date.
    pub fn is_nla(&self) -> bool {
        self.nla_date.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// The parent SKU, or the product's own SKU when it has none.
    pub fn fitment_key(&self) -> &str {
        if self.parent_sku.is_empty() {
            &self.sku
        } else {
            &self.parent_sku
        }
    }

    /// First segment of the first category path, e.g. "Engine" for
    /// "Engine/Gaskets|Cooling".
    pub fn main_category(&self) -> Option<&str> {
        self.categories
            .split('|')
            .next()
            .and_then(|path| path.split('/').next())
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Deserialize `null` as the type's default.
pub(crate) fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_type_priority() {
        assert_eq!(StockType::PrestigeParts.priority(), 1);
        assert_eq!(StockType::from_name("Aftermarket Product").priority(), 11);
        assert_eq!(StockType::from_name("Bundle").priority(), 15);
        assert_eq!(StockType::from_name("Mystery").priority(), 99);
        assert_eq!(StockType::Unspecified.priority(), 99);
    }

    #[test]
    fn test_stock_type_round_trips_unknown_names() {
        let stock_type = StockType::from_name("Factory Seconds");
        assert_eq!(stock_type, StockType::Other("Factory Seconds".to_string()));
        assert_eq!(stock_type.as_str(), "Factory Seconds");
    }

    #[test]
    fn test_stock_type_matches_ignores_case() {
        assert!(StockType::PrestigePartsOe.matches("prestige parts (oe)"));
        assert!(!StockType::PrestigeParts.matches("prestige parts (oe)"));
    }

    #[test]
    fn test_product_deserializes_camel_case_and_nulls() {
        let json = r#"{
            "sku": "UE12345A",
            "parentSku": "UE12345",
            "description": null,
            "price": 12.5,
            "stockType": "Uprated",
            "categories": "Engine/Gaskets",
            "inStock": false,
            "availableNow": 3,
            "available1to3Days": null,
            "nlaDate": null,
            "imageUrl": "https://img.example/ue12345.jpg"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.parent_sku, "UE12345");
        assert_eq!(product.description, "");
        assert_eq!(product.stock_type, StockType::Uprated);
        assert_eq!(product.available_now, 3);
        assert_eq!(product.available_1to3_days, 0);
        assert!(!product.is_nla());
    }

    #[test]
    fn test_product_serializes_stock_type_as_name() {
        let product = Product::new("A1", "A").with_stock_type(StockType::PrestigePartsOe);
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["stockType"], "Prestige Parts (OE)");
        assert_eq!(value["parentSku"], "A");
        assert!(value.get("supersessions").is_none());
    }

    #[test]
    fn test_in_stock_and_rank() {
        let flagged = Product::new("A", "").with_stock(0, 0, true);
        assert!(flagged.is_in_stock());
        assert_eq!(flagged.in_stock_rank(), 1);

        let arriving = Product::new("B", "").with_stock(0, 2, false);
        assert!(arriving.is_in_stock());
        assert_eq!(arriving.in_stock_rank(), 0);

        assert!(!Product::new("C", "").is_in_stock());
    }

    #[test]
    fn test_main_category_and_fitment_key() {
        let product = Product::new("RH1234", "").with_categories("Brakes/Pads|Engine");
        assert_eq!(product.main_category(), Some("Brakes"));
        assert_eq!(product.fitment_key(), "RH1234");
        assert_eq!(Product::new("X", "").main_category(), None);
    }
}
