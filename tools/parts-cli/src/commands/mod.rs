//! CLI command implementations.

pub mod chassis;
pub mod facets;
pub mod import;
pub mod product;
pub mod search;
pub mod shipping;
pub mod tenants;

use clap::{Args, Subcommand};

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Free-text query: SKU, base part number, retired SKU or description.
    pub query: Option<String>,

    /// Main category.
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory within the main category.
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Stock type name, e.g. "Prestige Parts".
    #[arg(long)]
    pub stock_type: Option<String>,

    /// Vehicle make.
    #[arg(long)]
    pub make: Option<String>,

    /// Vehicle model.
    #[arg(long)]
    pub model: Option<String>,

    /// Only parts no longer available from the manufacturer.
    #[arg(long)]
    pub nla_only: bool,

    /// Only parts in stock.
    #[arg(long)]
    pub in_stock_only: bool,

    /// Page number.
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Page size (default from config).
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Sort order.
    #[arg(long, default_value = "relevance")]
    pub sort: String,

    /// Show the listing as this reseller tenant sees it.
    #[arg(short, long)]
    pub tenant: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product SKU.
    pub sku: String,

    /// Number of related parts to show.
    #[arg(short, long, default_value_t = parts_catalog::catalog::DEFAULT_RELATED_LIMIT)]
    pub related: usize,
}

/// Arguments for the facets command.
#[derive(Args)]
pub struct FacetsArgs {
    #[command(subcommand)]
    pub command: Option<FacetsCommand>,
}

#[derive(Subcommand)]
pub enum FacetsCommand {
    /// Main categories and subcategories.
    Categories,
    /// Stock types in priority order.
    StockTypes,
    /// Makes and their models.
    Vehicles,
}

/// Arguments for the chassis command.
#[derive(Args)]
pub struct ChassisArgs {
    #[command(subcommand)]
    pub command: ChassisCommand,
}

#[derive(Subcommand)]
pub enum ChassisCommand {
    /// Validate a chassis range for a make and model.
    Validate {
        /// Vehicle make.
        make: String,
        /// Vehicle model.
        model: String,
        /// First chassis code in the range.
        start: String,
        /// Last chassis code (default: same as start).
        end: Option<String>,
    },
    /// Show the first and last chassis for a make and model.
    Summary {
        /// Vehicle make.
        make: String,
        /// Vehicle model.
        model: String,
        /// Chassis to list, split between both ends.
        #[arg(short, long, default_value_t = parts_catalog::fitment::DEFAULT_SUMMARY_LIMIT)]
        limit: usize,
    },
}

/// Arguments for the shipping command.
#[derive(Args)]
pub struct ShippingArgs {
    /// Item weights in kg. Use WEIGHTxQTY for quantities, e.g. 2.5x3.
    #[arg(required = true)]
    pub items: Vec<String>,

    /// Destination country (ISO alpha-3).
    #[arg(long, default_value = "USA")]
    pub country: String,

    /// Order subtotal in USD, to check free shipping.
    #[arg(long)]
    pub subtotal: Option<f64>,

    /// Weights are in pounds.
    #[arg(long)]
    pub lbs: bool,
}

/// Arguments for the tenants command.
#[derive(Args)]
pub struct TenantsArgs {
    /// Show one tenant by slug.
    pub slug: Option<String>,

    /// Look a tenant up by domain instead of slug.
    #[arg(long, conflicts_with = "slug")]
    pub domain: Option<String>,
}

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// JSON file holding rows as arrays of strings, header row first.
    pub file: String,

    /// Fail on unrecognized column headers.
    #[arg(long)]
    pub strict: bool,

    /// Write the updated products to this file.
    #[arg(long)]
    pub apply: Option<String>,
}
