//! Multi-tenant reseller storefronts.

mod overlay;
mod tenant;
mod view;

pub use overlay::{availability, default_flag_set, overlay, ResellerAvailability, ResellerProduct};
pub use tenant::{
    CompanyInfo, Feature, Tenant, TenantColors, TenantRegistry, PRESTIGE_PARTS_FILTER,
};
pub use view::{reseller_products, ResellerPage};
