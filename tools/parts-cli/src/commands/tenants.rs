//! Reseller tenant commands.

use anyhow::{bail, Result};
use console::style;

use parts_catalog::reseller::Tenant;

use super::TenantsArgs;
use crate::context::Context;

/// Run the tenants command.
pub async fn run(args: TenantsArgs, ctx: &Context) -> Result<()> {
    let registry = ctx.tenants()?;

    let tenant = match (&args.slug, &args.domain) {
        (Some(slug), _) => match registry.get(slug) {
            Some(tenant) => Some(tenant),
            None => bail!("Tenant '{}' not found. Known: {}", slug, registry.slugs().join(", ")),
        },
        (None, Some(domain)) => Some(registry.by_domain(domain)),
        (None, None) => None,
    };

    if let Some(tenant) = tenant {
        if ctx.output.is_json() {
            ctx.output.json(tenant);
            return Ok(());
        }
        print_tenant(tenant, ctx);
        return Ok(());
    }

    if ctx.output.is_json() {
        ctx.output.json(&registry.iter().collect::<Vec<_>>());
        return Ok(());
    }

    ctx.output.header("Tenants");
    ctx.output.table_row(&["SLUG", "NAME", "DOMAIN", "SITE"], &[16, 30, 32, 8]);
    ctx.output.info(&"-".repeat(92));
    let default_slug = &registry.default_tenant().slug;
    for tenant in registry.iter() {
        let site = if tenant.is_light_site() { "light" } else { "full" };
        let name = if tenant.slug == *default_slug {
            format!("{} {}", tenant.name, style("(default)").dim())
        } else {
            tenant.name.clone()
        };
        ctx.output
            .table_row(&[&tenant.slug, &name, &tenant.domain, site], &[16, 30, 32, 8]);
    }
    ctx.output.info(&format!("Total: {} tenant(s)", registry.len()));

    Ok(())
}

fn print_tenant(tenant: &Tenant, ctx: &Context) {
    ctx.output.header(&tenant.name);
    ctx.output.kv("Slug", &tenant.slug);
    ctx.output.kv("Domain", &tenant.domain);
    ctx.output.kv("Site", if tenant.is_light_site() { "light" } else { "full" });
    ctx.output.kv("Show prices", &tenant.show_prices.to_string());
    ctx.output.kv("Show cart", &tenant.show_cart.to_string());
    ctx.output.kv("Checkout", &tenant.checkout_enabled.to_string());
    ctx.output.kv("Active", &tenant.is_active.to_string());
    if let Some(email) = &tenant.order_email {
        ctx.output.kv("Order email", email);
    }

    let company = &tenant.company_info;
    if !company.name.is_empty() {
        ctx.output.header("Company");
        ctx.output.kv("Name", &company.name);
        for (key, value) in [
            ("Phone", &company.phone),
            ("Email", &company.email),
            ("Address", &company.address),
            ("Hours", &company.hours),
        ] {
            if let Some(value) = value {
                ctx.output.kv(key, value);
            }
        }
    }

    ctx.output.header("Theme");
    for (name, value) in tenant.css_variables() {
        if !value.is_empty() {
            ctx.output.kv(name, value);
        }
    }
}
