//! Parts catalog domain logic.
//!
//! This crate holds the data-matching routines behind an auto-parts
//! storefront:
//!
//! - **Catalog**: products, SKU normalization, supersessions, snapshot loading, facets
//! - **Fitment**: vehicle fitment index and chassis range validation
//! - **Search**: free-text matching, filters, relevance sort, pagination
//! - **Reseller**: tenant registry and per-tenant availability overlay
//! - **Shipping**: weight-band shipping estimates
//! - **Import**: typed bulk updates from tabular files
//!
//! # Example
//!
//! ```rust
//! use parts_catalog::prelude::*;
//!
//! let catalog = Catalog::new(
//!     vec![
//!         Product::new("UB83268A", "UB83268"),
//!         Product::new("UB83268X", "UB83268"),
//!     ],
//!     FitmentIndex::new(),
//!     SupersessionTable::new(),
//! );
//!
//! let page = filter_products(&catalog, &ProductQuery::new().with_search("UB83268"));
//! assert_eq!(page.products.len(), 2);
//! assert_eq!(page.search_type, Some(SearchType::Variant));
//! ```

pub mod error;
pub mod money;

pub mod catalog;
pub mod fitment;
pub mod import;
pub mod reseller;
pub mod search;
pub mod shipping;

pub use error::{CatalogError, ChassisError, StoreError};
pub use money::{Currency, Money};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::{CatalogError, ChassisError, StoreError};
    pub use crate::money::{Currency, Money};

    // Catalog
    pub use crate::catalog::{
        base_sku, Catalog, CategoryNode, Product, ProductDetail, RelatedPart, RelatedReason,
        StockType, SupersessionMatch, SupersessionTable, VehicleMake,
    };

    // Fitment
    pub use crate::fitment::{
        ChassisRecord, ChassisStore, ChassisSummary, ChassisValidator, FitmentIndex,
        FitmentRecord, InMemoryChassisStore, IssueKind, ValidationResult,
    };

    // Search
    pub use crate::search::{
        filter_products, match_products, Filter, Pagination, ProductPage, ProductQuery,
        SearchType, SortOption,
    };

    // Reseller
    pub use crate::reseller::{
        overlay, reseller_products, ResellerAvailability, ResellerPage, ResellerProduct, Tenant,
        TenantRegistry,
    };

    // Shipping
    pub use crate::shipping::{estimate, CartItem, ShippingQuote};

    // Import
    pub use crate::import::{HeaderMapping, ImportPlan, ProductField, UnknownHeaderPolicy};
}
