//! Shipping estimate command.

use anyhow::{Context as _, Result};
use serde::Serialize;

use parts_catalog::shipping::{
    self, estimate, lbs_to_kg, qualifies_for_free_shipping, CartItem, ShippingQuote,
};
use parts_catalog::{Currency, Money};

use super::ShippingArgs;
use crate::context::Context;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ShippingView {
    weight_kg: f64,
    country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    free_shipping: Option<bool>,
    quote: ShippingQuote,
}

/// Run the shipping command.
pub async fn run(args: ShippingArgs, ctx: &Context) -> Result<()> {
    let items = args
        .items
        .iter()
        .map(|item| parse_item(item, args.lbs))
        .collect::<Result<Vec<_>>>()?;

    let country = args.country.to_uppercase();
    let weight_kg = shipping::cart_weight(&items);
    let quote = estimate(&items, &country);
    let free_shipping = args
        .subtotal
        .map(|subtotal| qualifies_for_free_shipping(Money::from_decimal(subtotal, Currency::USD)));

    if ctx.output.is_json() {
        ctx.output.json(&ShippingView {
            weight_kg,
            country,
            free_shipping,
            quote,
        });
        return Ok(());
    }

    let destination = shipping::country_name(&country).unwrap_or(&country);
    ctx.output.header(&format!("Shipping to {}", destination));
    ctx.output.kv("Weight", &format!("{:.2} kg", weight_kg));

    if let Some(message) = &quote.message {
        ctx.output.warn(message);
    }
    for option in &quote.options {
        ctx.output.list_item(&format!(
            "{}: {} ({})",
            option.name,
            option.price_display(),
            option.estimated_days
        ));
    }

    match free_shipping {
        Some(true) => ctx.output.success("Order qualifies for free shipping"),
        Some(false) => ctx.output.info(&format!(
            "Free shipping from {}",
            shipping::FREE_SHIPPING_THRESHOLD
        )),
        None => {}
    }

    Ok(())
}

/// Parse `WEIGHT` or `WEIGHTxQTY`.
fn parse_item(item: &str, lbs: bool) -> Result<CartItem> {
    let (weight, quantity) = match item.split_once(['x', 'X']) {
        Some((weight, quantity)) => (
            weight,
            quantity
                .trim()
                .parse::<u32>()
                .with_context(|| format!("Invalid quantity in '{}'", item))?,
        ),
        None => (item, 1),
    };

    let weight: f64 = weight
        .trim()
        .parse()
        .with_context(|| format!("Invalid weight in '{}'", item))?;
    let weight = if lbs { lbs_to_kg(weight) } else { weight };

    Ok(CartItem::new(Some(weight), quantity))
}
