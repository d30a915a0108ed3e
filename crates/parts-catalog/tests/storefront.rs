//! End-to-end checks over a snapshot directory.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use parts_catalog::catalog::{FITMENT_FILE, PRODUCTS_FILE, SUPERSESSION_FILE};
use parts_catalog::prelude::*;
use parts_catalog::reseller::default_flag_set;

fn write_snapshot(dir: &Path) {
    fs::write(
        dir.join(PRODUCTS_FILE),
        r#"[
            {"sku": "UB83268A", "parentSku": "UB83268", "description": "Brake hose", "stockType": "Original Equipment", "availableNow": 0, "available1to3Days": 0, "inStock": false},
            {"sku": "UB83268X", "parentSku": "UB83268", "description": "Brake hose exchange", "stockType": "Reconditioned Exchange", "availableNow": 1},
            {"sku": "NEWPART456", "parentSku": "NEWPART456", "description": "Water pump", "stockType": "Prestige Parts", "availableNow": 4},
            {"sku": "NEWPART456-R", "parentSku": "NEWPART456", "description": "Water pump rebuilt", "stockType": "Rebuilt"},
            {"sku": "A1", "parentSku": "PARENT1", "description": "Seal", "stockType": "Prestige Parts", "categories": "Engine/Seals"},
            {"sku": "B1", "parentSku": "PARENT2", "description": "Seal", "stockType": "Prestige Parts", "categories": "Engine/Seals", "nlaDate": "2020-05-01"},
            {"sku": "C1", "parentSku": "PARENT3", "description": "Gasket", "stockType": "Prestige Parts", "categories": "Engine/Gaskets", "inStock": true},
            {"sku": "D1", "parentSku": "PARENT4", "description": "Gasket", "stockType": "Prestige Parts", "categories": "Engine/Gaskets", "available1to3Days": 2},
            {"sku": "E1", "parentSku": "PARENT5", "description": "Bush", "stockType": "Prestige Parts", "categories": "Suspension/Bushes"}
        ]"#,
    )
    .unwrap();
    fs::write(
        dir.join(FITMENT_FILE),
        r#"{
            "PARENT1": [{"make": "Bentley", "model": "Arnage", "chassisStart": "LCH00001", "chassisEnd": 12000}],
            "PARENT3": [{"make": "Rolls-Royce", "model": "Silver Seraph"}],
            "UB83268": [{"make": "Bentley", "model": "Turbo R"}]
        }"#,
    )
    .unwrap();
    fs::write(dir.join(SUPERSESSION_FILE), r#"{"OLDPART123": ["NEWPART456"]}"#).unwrap();
}

fn catalog() -> Catalog {
    let dir = tempfile::tempdir().unwrap();
    write_snapshot(dir.path());
    Catalog::load(dir.path()).unwrap()
}

#[test]
fn variants_of_a_base_part_are_tagged() {
    let page = filter_products(&catalog(), &ProductQuery::new().with_search("UB83268"));

    let mut found: Vec<_> = page.products.iter().map(|p| p.sku.as_str()).collect();
    found.sort_unstable();
    assert_eq!(found, vec!["UB83268A", "UB83268X"]);
    assert_eq!(page.search_type, Some(SearchType::Variant));
    assert!(page.supersession_match.is_none());
}

#[test]
fn retired_part_number_resolves_to_replacements() {
    let page = filter_products(&catalog(), &ProductQuery::new().with_search("oldpart123"));

    let found: HashSet<_> = page.products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(found, HashSet::from(["NEWPART456", "NEWPART456-R"]));
    assert_eq!(page.search_type, Some(SearchType::Supersession));

    let hit = page.supersession_match.unwrap();
    assert_eq!(hit.old_sku, "OLDPART123");
    assert_eq!(hit.current_skus, vec!["NEWPART456"]);
}

#[test]
fn exact_sku_is_never_tagged_as_variant() {
    let catalog = catalog();
    for product in catalog.products() {
        let query = ProductQuery::new()
            .with_search(product.sku.as_str())
            .with_sort(SortOption::from_name("none"));
        let page = filter_products(&catalog, &query);
        assert_eq!(page.products[0].sku, product.sku);
        assert_ne!(page.search_type, Some(SearchType::Variant));
    }
}

#[test]
fn stock_type_filter_paginates() {
    let query = ProductQuery::new()
        .with_stock_type("Prestige Parts")
        .with_pagination(1, 2);
    let page = filter_products(&catalog(), &query);

    assert_eq!(page.products.len(), 2);
    assert_eq!(
        page.pagination,
        Pagination {
            page: 1,
            limit: 2,
            total: 6,
            total_pages: 3,
            has_more: true,
        }
    );

    let json = serde_json::to_value(&page).unwrap();
    assert_eq!(json["pagination"]["totalPages"], 3);
    assert_eq!(json["pagination"]["hasMore"], true);
    assert!(json["supersessionMatch"].is_null());
    assert!(json["searchType"].is_null());
}

#[test]
fn make_filter_uses_fitment() {
    let query = ProductQuery::new().with_make("Bentley").with_category("Engine", None);
    let page = filter_products(&catalog(), &query);

    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].sku, "A1");
}

#[test]
fn in_stock_only_excludes_empty_stock() {
    let query = ProductQuery::new().in_stock_only().with_pagination(1, 100);
    let page = filter_products(&catalog(), &query);

    assert!(!page.products.is_empty());
    for product in &page.products {
        assert!(product.available_now > 0 || product.available_1to3_days > 0 || product.in_stock);
    }
}

#[test]
fn relevance_orders_by_priority_then_stock_then_sku() {
    let page = filter_products(
        &catalog(),
        &ProductQuery::new().with_stock_type("prestige parts").with_pagination(1, 100),
    );

    // C1 has only the in-stock flag, so it ranks with the unstocked parts.
    assert_eq!(
        page.products.iter().map(|p| p.sku.as_str()).collect::<Vec<_>>(),
        vec!["D1", "NEWPART456", "A1", "B1", "C1", "E1"]
    );
}

#[test]
fn same_page_twice_is_identical() {
    let catalog = catalog();
    let query = ProductQuery::from_query_string("category=engine&page=2&limit=3");

    assert_eq!(filter_products(&catalog, &query), filter_products(&catalog, &query));
}

#[test]
fn nla_filter() {
    let page = filter_products(&catalog(), &ProductQuery::from_query_string("nlaOnly=true"));
    assert_eq!(page.products.len(), 1);
    assert_eq!(page.products[0].sku, "B1");
}

#[test]
fn reseller_overlay_covers_the_page() {
    let catalog = catalog();
    let page = filter_products(&catalog, &ProductQuery::new().with_pagination(1, 100));
    let annotated = overlay(&page.products, &default_flag_set());

    assert_eq!(annotated.len(), page.products.len());
    for item in &annotated {
        let expected = if matches!(item.product.stock_type, StockType::PrestigeParts) {
            ResellerAvailability::Available
        } else {
            ResellerAvailability::SendRequest
        };
        assert_eq!(item.reseller_availability, expected);
    }
}

#[tokio::test]
async fn inverted_chassis_range_is_invalid() {
    let store = InMemoryChassisStore::new(vec![
        ChassisRecord::new("Bentley", "Continental GT", "ALB36", 100),
        ChassisRecord::new("Bentley", "Continental GT", "ALB99", 50),
    ]);
    let validator = ChassisValidator::new(store);

    let result = validator
        .validate("Bentley", "Continental GT", "ALB36", Some("ALB99"))
        .await
        .unwrap();

    assert!(result.has_issue(IssueKind::InvertedRange));
    assert!(!result.valid);

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["issues"][0]["type"], "inverted_range");
    assert_eq!(json["startSortOrder"], 100);
}

#[test]
fn bundled_tenant_registry_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/tenants.toml");
    let registry = TenantRegistry::load(path).unwrap();

    assert_eq!(registry.len(), 5);
    assert_eq!(registry.default_tenant().slug, "introcar-us");
    assert_eq!(registry.get_tenant("missing").slug, "introcar-us");

    let albers = registry.by_domain("albers.introcar.com");
    assert_eq!(albers.slug, "albers-rb");
    assert!(albers.is_light_site());
    assert_eq!(albers.css_variables()["--color-primary"], "#2D5A27");
    assert!(!registry.get_tenant("reseller-3").show_prices);
}

#[test]
fn bundled_prestige_tenant_lists_branded_stock() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/tenants.toml");
    let registry = TenantRegistry::load(path).unwrap();
    let catalog = catalog();
    let query = ProductQuery::new().with_pagination(1, 4);

    let albers = reseller_products(&catalog, registry.get_tenant("albers-rb"), &query);
    assert_eq!(albers.page.pagination.total, 6);
    assert_eq!(albers.page.pagination.total_pages, 2);
    assert!(albers
        .page
        .products
        .iter()
        .all(|p| p.product.stock_type == StockType::PrestigeParts));

    let full = reseller_products(&catalog, registry.default_tenant(), &query);
    assert_eq!(full.page.pagination.total, 9);
}
