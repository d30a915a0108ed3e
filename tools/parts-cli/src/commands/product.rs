//! Product detail command.

use anyhow::{bail, Result};
use serde::Serialize;

use parts_catalog::catalog::{ProductDetail, RelatedPart, RelatedReason};

use super::ProductArgs;
use crate::context::Context;
use crate::output::stock_label;

#[derive(Serialize)]
struct ProductView {
    product: ProductDetail,
    related: Vec<RelatedPart>,
}

/// Run the product command.
pub async fn run(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    let Some(detail) = catalog.product_by_sku(&args.sku) else {
        bail!("Product '{}' not found", args.sku);
    };
    let related = catalog.related_parts(&args.sku, args.related);

    if ctx.output.is_json() {
        ctx.output.json(&ProductView {
            product: detail,
            related,
        });
        return Ok(());
    }

    let product = &detail.product;
    ctx.output.header(&product.sku);
    ctx.output.kv("Description", &product.description);
    ctx.output.kv("Parent SKU", &product.parent_sku);
    ctx.output.kv("Stock type", product.stock_type.as_str());
    ctx.output.kv("Price", &format!("${:.2}", product.price));
    if let Some(weight) = product.weight {
        ctx.output.kv("Weight", &format!("{} kg", weight));
    }
    ctx.output.kv(
        "Stock",
        &stock_label(product.available_now, product.available_1to3_days, product.in_stock),
    );
    if let Some(category) = product.main_category() {
        ctx.output.kv("Category", category);
    }
    if product.is_nla() {
        ctx.output.warn(&format!(
            "No longer available from the manufacturer since {}",
            product.nla_date.as_deref().unwrap_or_default()
        ));
    }

    ctx.output.header("Fitment");
    if detail.fitment.is_empty() {
        ctx.output.info("No fitment data");
    }
    for record in &detail.fitment {
        let range = match (&record.chassis_start, &record.chassis_end) {
            (Some(start), Some(end)) => format!(" ({} - {})", start, end),
            (Some(start), None) => format!(" (from {})", start),
            (None, Some(end)) => format!(" (to {})", end),
            (None, None) => String::new(),
        };
        ctx.output.list_item(&format!("{} {}{}", record.make, record.model, range));
    }

    if !related.is_empty() {
        ctx.output.header("Related parts");
        for part in &related {
            let reason = match part.reason {
                RelatedReason::Category => "same category",
                RelatedReason::SameModel => "fits the same model",
            };
            ctx.output.list_item(&format!(
                "{}  {}  ({})",
                part.product.sku, part.product.description, reason
            ));
        }
    }

    Ok(())
}
