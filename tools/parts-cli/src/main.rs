//! Parts CLI - Command line tool for the parts catalog.
//!
//! Commands:
//! - `parts search` - Search and filter the catalog
//! - `parts product` - Show a product with fitment and related parts
//! - `parts facets` - List categories, stock types and vehicles
//! - `parts chassis` - Validate chassis ranges and list chassis runs
//! - `parts shipping` - Estimate shipping for a set of item weights
//! - `parts tenants` - List reseller tenants
//! - `parts import` - Plan or apply a bulk product update

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{
    ChassisArgs, FacetsArgs, ImportArgs, ProductArgs, SearchArgs, ShippingArgs, TenantsArgs,
};

/// Parts CLI - Query and maintain the parts catalog
#[derive(Parser)]
#[command(name = "parts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search and filter products
    Search(SearchArgs),

    /// Show a product with its fitment and related parts
    Product(ProductArgs),

    /// List categories, stock types and vehicles
    Facets(FacetsArgs),

    /// Chassis range validation
    Chassis(ChassisArgs),

    /// Estimate shipping
    Shipping(ShippingArgs),

    /// List reseller tenants
    Tenants(TenantsArgs),

    /// Plan or apply a bulk product update
    Import(ImportArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output)?;

    let result = match cli.command {
        Commands::Search(args) => commands::search::run(args, &ctx).await,
        Commands::Product(args) => commands::product::run(args, &ctx).await,
        Commands::Facets(args) => commands::facets::run(args, &ctx).await,
        Commands::Chassis(args) => commands::chassis::run(args, &ctx).await,
        Commands::Shipping(args) => commands::shipping::run(args, &ctx).await,
        Commands::Tenants(args) => commands::tenants::run(args, &ctx).await,
        Commands::Import(args) => commands::import::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
