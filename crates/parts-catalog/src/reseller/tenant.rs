//! Reseller tenant configuration.
//!
//! Tenants are read from a TOML file at startup:
//!
//! ```toml
//! default = "introcar-us"
//!
//! [[tenant]]
//! name = "IntroCar US"
//! slug = "introcar-us"
//! domain = "intro-car-us.vercel.app"
//! features = ["full"]
//!
//! [tenant.colors]
//! primary = "#1e3a5f"
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::catalog::StockType;
use crate::error::CatalogError;
use crate::search::Filter;

/// `sku_filter` tag for storefronts that list only Prestige Parts branded stock.
pub const PRESTIGE_PARTS_FILTER: &str = "prestige_parts";

/// Storefront feature level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Every storefront feature.
    Full,
    /// Reduced reseller storefront.
    Light,
}

/// Theme colors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TenantColors {
    pub primary: String,
    pub primary_dark: String,
    pub accent: String,
    pub accent_light: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub text_light: String,
}

/// Contact details shown on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct CompanyInfo {
    pub name: String,
    pub tagline: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub sales_email: Option<String>,
    pub address: Option<String>,
    pub parts_address: Option<String>,
    pub hours: Option<String>,
    pub website: Option<String>,
}

/// A storefront tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub colors: TenantColors,
    #[serde(default)]
    pub logo: Option<String>,
    /// Product subset tag. `None` means every product.
    #[serde(default)]
    pub sku_filter: Option<String>,
    /// Address for order notifications. `None` means webhooks.
    #[serde(default)]
    pub order_email: Option<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub show_prices: bool,
    #[serde(default)]
    pub show_cart: bool,
    #[serde(default)]
    pub checkout_enabled: bool,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default)]
    pub company_info: CompanyInfo,
}

fn active_by_default() -> bool {
    true
}

impl Tenant {
    /// Whether the tenant runs the reduced storefront.
    pub fn is_light_site(&self) -> bool {
        self.features.contains(&Feature::Light)
    }

    /// Extra listing stage selecting this tenant's product subset.
    ///
    /// Tags without product data behind them select every product.
    pub fn product_filter(&self) -> Option<Filter> {
        match self.sku_filter.as_deref()? {
            PRESTIGE_PARTS_FILTER => Some(Filter::StockTypeIn(vec![
                StockType::PrestigeParts,
                StockType::PrestigePartsOe,
                StockType::Uprated,
            ])),
            other => {
                tracing::debug!(tenant = %self.slug, sku_filter = other, "no product subset for tag");
                None
            }
        }
    }

    /// CSS custom properties for the tenant theme.
    pub fn css_variables(&self) -> BTreeMap<&'static str, &str> {
        let c = &self.colors;
        BTreeMap::from([
            ("--color-primary", c.primary.as_str()),
            ("--color-primary-dark", c.primary_dark.as_str()),
            ("--color-accent", c.accent.as_str()),
            ("--color-accent-light", c.accent_light.as_str()),
            ("--color-secondary", c.secondary.as_str()),
            ("--color-background", c.background.as_str()),
            ("--color-text", c.text.as_str()),
            ("--color-text-light", c.text_light.as_str()),
        ])
    }
}

#[derive(Deserialize)]
struct TenantFile {
    default: String,
    #[serde(default, rename = "tenant")]
    tenants: Vec<Tenant>,
}

/// Immutable tenant lookup built once at startup.
#[derive(Debug, Clone)]
pub struct TenantRegistry {
    tenants: BTreeMap<String, Tenant>,
    default_slug: String,
}

impl TenantRegistry {
    /// Build a registry. Fails on duplicate slugs or a missing default.
    pub fn new(tenants: Vec<Tenant>, default_slug: impl Into<String>) -> Result<Self, CatalogError> {
        let default_slug = default_slug.into();
        let mut by_slug = BTreeMap::new();

        for tenant in tenants {
            let slug = tenant.slug.clone();
            if by_slug.insert(slug.clone(), tenant).is_some() {
                return Err(CatalogError::DuplicateTenant(slug));
            }
        }

        if !by_slug.contains_key(&default_slug) {
            return Err(CatalogError::MissingDefaultTenant(default_slug));
        }

        Ok(Self {
            tenants: by_slug,
            default_slug,
        })
    }

    /// Parse tenant TOML.
    pub fn from_toml(text: &str) -> Result<Self, CatalogError> {
        let file: TenantFile = toml::from_str(text)?;
        Self::new(file.tenants, file.default)
    }

    /// Read and parse a tenant TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let registry = Self::from_toml(&text)?;
        tracing::info!(tenants = registry.tenants.len(), path = %path.display(), "tenants loaded");
        Ok(registry)
    }

    /// Exact slug lookup.
    pub fn get(&self, slug: &str) -> Option<&Tenant> {
        self.tenants.get(slug)
    }

    /// Slug lookup falling back to the default tenant.
    pub fn get_tenant(&self, slug: &str) -> &Tenant {
        self.get(slug).unwrap_or_else(|| self.default_tenant())
    }

    /// Domain lookup falling back to the default tenant.
    pub fn by_domain(&self, domain: &str) -> &Tenant {
        self.tenants
            .values()
            .find(|t| t.domain == domain)
            .unwrap_or_else(|| self.default_tenant())
    }

    pub fn default_tenant(&self) -> &Tenant {
        // Presence is checked in `new`.
        &self.tenants[&self.default_slug]
    }

    /// All slugs, sorted.
    pub fn slugs(&self) -> Vec<&str> {
        self.tenants.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tenant> {
        self.tenants.values()
    }

    pub fn len(&self) -> usize {
        self.tenants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tenants.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TENANTS: &str = r##"
default = "introcar-us"

[[tenant]]
name = "IntroCar US"
slug = "introcar-us"
domain = "intro-car-us.vercel.app"
features = ["full"]
show_prices = true
show_cart = true
checkout_enabled = true

[tenant.colors]
primary = "#1e3a5f"
primary_dark = "#142840"
text_light = "#666666"

[[tenant]]
name = "Albers Motorcars"
slug = "albers-rb"
domain = "albers.introcar.com"
sku_filter = "prestige_parts"
features = ["light"]
show_prices = true

[tenant.company_info]
name = "Albers Motorcars"
phone = "(317) 873-2360"
"##;

    #[test]
    fn test_from_toml() {
        let registry = TenantRegistry::from_toml(TENANTS).unwrap();

        assert_eq!(registry.slugs(), vec!["albers-rb", "introcar-us"]);
        let albers = registry.get("albers-rb").unwrap();
        assert!(albers.is_light_site());
        assert!(albers.is_active);
        assert!(!albers.show_cart);
        assert_eq!(albers.company_info.phone.as_deref(), Some("(317) 873-2360"));
    }

    #[test]
    fn test_get_tenant_falls_back_to_default() {
        let registry = TenantRegistry::from_toml(TENANTS).unwrap();
        assert_eq!(registry.get_tenant("nope").slug, "introcar-us");
        assert_eq!(registry.by_domain("albers.introcar.com").slug, "albers-rb");
        assert_eq!(registry.by_domain("example.com").slug, "introcar-us");
        assert!(registry.get("nope").is_none());
    }

    #[test]
    fn test_css_variables() {
        let registry = TenantRegistry::from_toml(TENANTS).unwrap();
        let vars = registry.default_tenant().css_variables();
        assert_eq!(vars["--color-primary"], "#1e3a5f");
        assert_eq!(vars["--color-primary-dark"], "#142840");
        assert_eq!(vars["--color-accent"], "");
        assert_eq!(vars.len(), 8);
    }

    #[test]
    fn test_missing_default_is_error() {
        let err = TenantRegistry::from_toml("default = \"ghost\"\n").unwrap_err();
        assert!(matches!(err, CatalogError::MissingDefaultTenant(slug) if slug == "ghost"));
    }

    #[test]
    fn test_duplicate_slug_is_error() {
        let tenant = Tenant {
            name: "A".to_string(),
            slug: "a".to_string(),
            domain: String::new(),
            colors: TenantColors::default(),
            logo: None,
            sku_filter: None,
            order_email: None,
            features: vec![Feature::Full],
            show_prices: true,
            show_cart: true,
            checkout_enabled: true,
            is_active: true,
            company_info: CompanyInfo::default(),
        };
        let err = TenantRegistry::new(vec![tenant.clone(), tenant], "a").unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateTenant(_)));
    }

    #[test]
    fn test_bad_toml_is_error() {
        assert!(matches!(
            TenantRegistry::from_toml("default = ["),
            Err(CatalogError::TenantConfig(_))
        ));
    }
}
