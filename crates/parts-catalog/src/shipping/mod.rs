//! Shipping estimates by cart weight and destination.

mod rates;

pub use rates::{find_band, RateBand, USA_RATES};

use serde::{Deserialize, Serialize};

use crate::money::{Currency, Money};

/// Orders at or above this subtotal ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::usd(50_000);

/// Weights above this need a manual quote.
pub const MAX_RATED_WEIGHT_KG: f64 = 100.0;

/// Weight assumed for items without one.
pub const DEFAULT_ITEM_WEIGHT_KG: f64 = 0.5;

/// ISO 3166 alpha-3 code for the United States.
pub const USA: &str = "USA";

const KG_PER_LB: f64 = 0.453592;
const LB_PER_KG: f64 = 2.20462;

/// Method name used when a quote is required for heavy items.
const QUOTE_METHOD: &str = "Dimensions Required - You will be contacted to confirm shipping cost";

/// A way to ship an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingOption {
    /// Carrier method name.
    pub method: String,
    /// Display name.
    pub name: String,
    pub description: String,
    pub estimated_days: String,
    /// `None` when the price must be quoted.
    pub price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
}

impl ShippingOption {
    fn dhl_air(price: Money, weight_kg: f64) -> Self {
        Self {
            method: "DHL Air Service".to_string(),
            name: "DHL Express Air".to_string(),
            description: "International express air freight".to_string(),
            estimated_days: "3-5 business days".to_string(),
            price: Some(price),
            weight_kg: Some(weight_kg),
        }
    }

    fn heavy_item_quote() -> Self {
        Self {
            method: QUOTE_METHOD.to_string(),
            name: "Quote Required".to_string(),
            description: "Large/heavy items require custom shipping quote".to_string(),
            estimated_days: "Contact for estimate".to_string(),
            price: None,
            weight_kg: None,
        }
    }

    fn international_quote() -> Self {
        Self {
            method: "International Shipping".to_string(),
            name: "International Shipping".to_string(),
            description: "Contact us for international shipping rates".to_string(),
            estimated_days: "Contact for estimate".to_string(),
            price: None,
            weight_kg: None,
        }
    }

    /// Price for display, or "Quote Required".
    pub fn price_display(&self) -> String {
        match &self.price {
            Some(price) => price.display(),
            None => "Quote Required".to_string(),
        }
    }
}

/// Result of a shipping calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    /// The customer must be contacted for a price.
    pub needs_quote: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub options: Vec<ShippingOption>,
}

impl ShippingQuote {
    /// Cheapest priced option, if any.
    pub fn best_price(&self) -> Option<Money> {
        self.options.iter().filter_map(|o| o.price).min_by_key(|p| p.amount_cents)
    }
}

/// A cart line for weighting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct CartItem {
    /// Item weight in kg.
    pub weight: Option<f64>,
    /// Quantity, treated as 1 when unset.
    pub quantity: Option<u32>,
}

impl CartItem {
    pub fn new(weight: Option<f64>, quantity: u32) -> Self {
        Self {
            weight,
            quantity: Some(quantity),
        }
    }
}

/// DHL air estimate to the USA for a total weight.
pub fn calculate_usa_shipping(weight_kg: f64) -> ShippingQuote {
    if weight_kg > MAX_RATED_WEIGHT_KG {
        return ShippingQuote {
            needs_quote: true,
            message: Some(
                "Items over 100kg require a custom shipping quote. We will contact you to confirm the shipping cost."
                    .to_string(),
            ),
            options: vec![ShippingOption::heavy_item_quote()],
        };
    }

    // Weights in no band, including zero, use the lightest rate.
    let band = find_band(&USA_RATES, weight_kg).unwrap_or(&USA_RATES[0]);

    ShippingQuote {
        needs_quote: false,
        message: None,
        options: vec![ShippingOption::dhl_air(band.price, weight_kg)],
    }
}

/// Total cart weight in kg.
pub fn cart_weight(items: &[CartItem]) -> f64 {
    items
        .iter()
        .map(|item| {
            let weight = item.weight.filter(|w| *w > 0.0).unwrap_or(DEFAULT_ITEM_WEIGHT_KG);
            let quantity = item.quantity.filter(|q| *q > 0).unwrap_or(1);
            weight * f64::from(quantity)
        })
        .sum()
}

/// Shipping estimate for a cart going to a country (alpha-3 code).
pub fn estimate(items: &[CartItem], country_code: &str) -> ShippingQuote {
    let weight = cart_weight(items);

    if country_code == USA {
        return calculate_usa_shipping(weight);
    }

    let country = country_name(country_code).unwrap_or(country_code);
    tracing::debug!(country = country_code, weight, "shipping quote required");

    ShippingQuote {
        needs_quote: true,
        message: Some(format!(
            "Shipping to {country} requires a quote. Please contact us."
        )),
        options: vec![ShippingOption::international_quote()],
    }
}

/// Whether a subtotal earns free shipping.
pub fn qualifies_for_free_shipping(subtotal: Money) -> bool {
    subtotal.currency == Currency::USD && subtotal.amount_cents >= FREE_SHIPPING_THRESHOLD.amount_cents
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs * KG_PER_LB
}

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LB_PER_KG
}

/// Display name for common destination codes.
pub fn country_name(code: &str) -> Option<&'static str> {
    let name = match code {
        "USA" => "United States",
        "GBR" => "United Kingdom",
        "CAN" => "Canada",
        "AUS" => "Australia",
        "DEU" => "Germany",
        "FRA" => "France",
        "ITA" => "Italy",
        "ESP" => "Spain",
        "NLD" => "Netherlands",
        "BEL" => "Belgium",
        "AUT" => "Austria",
        "CHE" => "Switzerland",
        "JPN" => "Japan",
        "NZL" => "New Zealand",
        "IRL" => "Ireland",
        "SWE" => "Sweden",
        "NOR" => "Norway",
        "DNK" => "Denmark",
        "FIN" => "Finland",
        "PRT" => "Portugal",
        "ARE" => "United Arab Emirates",
        "SAU" => "Saudi Arabia",
        "ZAF" => "South Africa",
        "SGP" => "Singapore",
        "HKG" => "Hong Kong",
        "MEX" => "Mexico",
        "BRA" => "Brazil",
        "ARG" => "Argentina",
        "IND" => "India",
        "CHN" => "China",
        _ => return None,
    };
    Some(name)
}
