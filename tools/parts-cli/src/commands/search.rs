//! Catalog search command.

use anyhow::Result;
use parts_catalog::catalog::{Product, SupersessionMatch};
use parts_catalog::reseller::reseller_products;
use parts_catalog::search::{filter_products, Pagination, ProductQuery, SearchType, SortOption};

use super::SearchArgs;
use crate::context::Context;
use crate::output::{availability_badge, stock_label, truncate};

const WIDTHS: [usize; 5] = [16, 40, 24, 14, 16];

/// Run the search command.
pub async fn run(args: SearchArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog()?;
    let query = build_query(&args, ctx.config.search.default_limit);

    if let Some(slug) = &args.tenant {
        let registry = ctx.tenants()?;
        let tenant = registry.get_tenant(slug);
        if tenant.slug != *slug {
            ctx.output.warn(&format!("Unknown tenant '{}', using '{}'", slug, tenant.slug));
        }

        let page = reseller_products(&catalog, tenant, &query);
        if ctx.output.is_json() {
            ctx.output.json(&page);
            return Ok(());
        }

        ctx.output.header(&format!("Products for {}", tenant.name));
        print_search_type(ctx, page.page.search_type, page.page.supersession_match.as_ref());
        header_row(ctx, "AVAILABILITY");
        for item in &page.page.products {
            product_row(ctx, &item.product, &availability_badge(item.reseller_availability));
        }
        print_pagination(ctx, &page.page.pagination);
        return Ok(());
    }

    let page = filter_products(&catalog, &query);
    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Products");
    print_search_type(ctx, page.search_type, page.supersession_match.as_ref());
    header_row(ctx, "STOCK");
    for product in &page.products {
        let stock = stock_label(product.available_now, product.available_1to3_days, product.in_stock);
        product_row(ctx, product, &stock);
    }
    print_pagination(ctx, &page.pagination);

    Ok(())
}

fn build_query(args: &SearchArgs, default_limit: usize) -> ProductQuery {
    ProductQuery {
        search: args.query.clone(),
        category: args.category.clone(),
        subcategory: args.subcategory.clone(),
        stock_type: args.stock_type.clone(),
        make: args.make.clone(),
        model: args.model.clone(),
        nla_only: args.nla_only,
        in_stock_only: args.in_stock_only,
        sort: SortOption::from_name(&args.sort),
        ..ProductQuery::new()
    }
    .with_pagination(args.page, args.limit.unwrap_or(default_limit))
}

fn print_search_type(
    ctx: &Context,
    search_type: Option<SearchType>,
    supersession: Option<&SupersessionMatch>,
) {
    match (search_type, supersession) {
        (Some(SearchType::Supersession), Some(hit)) => ctx.output.info(&format!(
            "{} has been superseded by {}",
            hit.old_sku,
            hit.current_skus.join(", ")
        )),
        (Some(SearchType::Variant), _) => ctx.output.info("Showing all variants of this part"),
        _ => {}
    }
}

fn header_row(ctx: &Context, last: &str) {
    ctx.output
        .table_row(&["SKU", "DESCRIPTION", "STOCK TYPE", "PRICE", last], &WIDTHS);
    ctx.output.info(&"-".repeat(WIDTHS.iter().sum::<usize>() + 8));
}

fn product_row(ctx: &Context, product: &Product, last: &str) {
    let description = truncate(&product.description, WIDTHS[1]);
    let stock_type = truncate(product.stock_type.as_str(), WIDTHS[2]);
    let price = format!("${:.2}", product.price);
    ctx.output.table_row(
        &[&product.sku, &description, &stock_type, &price, last],
        &WIDTHS,
    );
}

fn print_pagination(ctx: &Context, pagination: &Pagination) {
    if pagination.total == 0 {
        ctx.output.info("No products found");
        return;
    }
    ctx.output.info(&format!(
        "Showing {}-{} of {} (page {} of {})",
        pagination.start_item(),
        pagination.end_item(),
        pagination.total,
        pagination.page,
        pagination.total_pages
    ));
    if pagination.has_more {
        ctx.output.debug(&format!("Next page: --page {}", pagination.page + 1));
    }
}
