//! Product listings as a reseller storefront sees them.

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::reseller::{default_flag_set, overlay, ResellerProduct, Tenant};
use crate::search::{filter_products_with, ProductPage, ProductQuery};

/// A listing page for a tenant storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResellerPage {
    #[serde(flatten)]
    pub page: ProductPage<ResellerProduct>,
    /// Tenant slug.
    pub tenant: String,
    pub show_prices: bool,
    pub show_cart: bool,
}

/// Run a listing query and annotate the resulting page for a tenant.
///
/// The tenant's product subset is filtered before pagination. The overlay
/// only annotates the page and leaves the totals alone.
pub fn reseller_products(catalog: &Catalog, tenant: &Tenant, query: &ProductQuery) -> ResellerPage {
    let flags = default_flag_set();
    let extra: Vec<_> = tenant.product_filter().into_iter().collect();
    let page =
        filter_products_with(catalog, query, &extra).map(|products| overlay(&products, &flags));

    ResellerPage {
        page,
        tenant: tenant.slug.clone(),
        show_prices: tenant.show_prices,
        show_cart: tenant.show_cart,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Product, StockType, SupersessionTable};
    use crate::fitment::FitmentIndex;
    use crate::reseller::{ResellerAvailability, TenantRegistry};

    #[test]
    fn test_reseller_products_overlays_page_only() {
        let catalog = Catalog::new(
            (0..5)
                .map(|i| Product::new(format!("P{i}"), "").with_stock_type(StockType::PrestigeParts))
                .chain([Product::new("Z1", "").with_stock_type(StockType::Used)])
                .collect(),
            FitmentIndex::new(),
            SupersessionTable::new(),
        );
        let registry = TenantRegistry::from_toml(
            "default = \"albers-rb\"\n[[tenant]]\nname = \"Albers\"\nslug = \"albers-rb\"\nshow_prices = true\n",
        )
        .unwrap();

        let query = ProductQuery::new().with_pagination(2, 4);
        let page = reseller_products(&catalog, registry.default_tenant(), &query);

        assert_eq!(page.tenant, "albers-rb");
        assert!(page.show_prices);
        assert!(!page.show_cart);
        assert_eq!(page.page.pagination.total, 6);
        let statuses: Vec<_> = page
            .page
            .products
            .iter()
            .map(|p| (p.product.sku.as_str(), p.reseller_availability))
            .collect();
        assert_eq!(
            statuses,
            vec![
                ("P4", ResellerAvailability::Available),
                ("Z1", ResellerAvailability::SendRequest),
            ]
        );

        let value = serde_json::to_value(&page).unwrap();
        assert_eq!(value["tenant"], "albers-rb");
        assert_eq!(value["pagination"]["total"], 6);
        assert_eq!(value["showCart"], false);
    }

    #[test]
    fn test_prestige_parts_tenant_sees_branded_stock_only() {
        let catalog = Catalog::new(
            vec![
                Product::new("A", "").with_stock_type(StockType::PrestigeParts),
                Product::new("B", "").with_stock_type(StockType::Used),
                Product::new("C", "").with_stock_type(StockType::Uprated),
                Product::new("D", "").with_stock_type(StockType::PrestigePartsOe),
                Product::new("E", "").with_stock_type(StockType::OriginalEquipment),
            ],
            FitmentIndex::new(),
            SupersessionTable::new(),
        );
        let registry = TenantRegistry::from_toml(
            "default = \"albers-rb\"\n[[tenant]]\nname = \"Albers\"\nslug = \"albers-rb\"\nsku_filter = \"prestige_parts\"\n\n[[tenant]]\nname = \"Other\"\nslug = \"reseller-2\"\nsku_filter = \"reseller_2\"\n",
        )
        .unwrap();
        let query = ProductQuery::new().with_pagination(1, 2);

        let page = reseller_products(&catalog, registry.default_tenant(), &query);
        let skus: Vec<_> = page.page.products.iter().map(|p| p.product.sku.as_str()).collect();
        assert_eq!(skus, vec!["A", "D"]);
        assert_eq!(page.page.pagination.total, 3);
        assert_eq!(page.page.pagination.total_pages, 2);

        let page = reseller_products(&catalog, registry.get_tenant("reseller-2"), &query);
        assert_eq!(page.page.pagination.total, 5);
    }
}
