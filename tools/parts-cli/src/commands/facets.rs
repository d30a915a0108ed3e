//! Listing facet commands.

use anyhow::Result;

use super::{FacetsArgs, FacetsCommand};
use crate::context::Context;

/// Run the facets command.
pub async fn run(args: FacetsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;

    match args.command {
        Some(FacetsCommand::Categories) | None => {
            let tree = catalog.category_tree();
            if ctx.output.is_json() {
                ctx.output.json(&tree);
                return Ok(());
            }

            ctx.output.header("Categories");
            for node in &tree {
                ctx.output.list_item(&node.name);
                for sub in &node.subcategories {
                    ctx.output.list_item(&format!("  {}", sub));
                }
            }
        }
        Some(FacetsCommand::StockTypes) => {
            let types = catalog.stock_types();
            if ctx.output.is_json() {
                ctx.output.json(&types);
                return Ok(());
            }

            ctx.output.header("Stock types");
            for stock_type in &types {
                ctx.output.list_item(&format!(
                    "{} (priority {})",
                    stock_type.as_str(),
                    stock_type.priority()
                ));
            }
        }
        Some(FacetsCommand::Vehicles) => {
            let vehicles = catalog.vehicle_data();
            if ctx.output.is_json() {
                ctx.output.json(&vehicles);
                return Ok(());
            }

            ctx.output.header("Vehicles");
            for vehicle in &vehicles {
                ctx.output.kv(&vehicle.make, &vehicle.models.join(", "));
            }
        }
    }

    Ok(())
}
