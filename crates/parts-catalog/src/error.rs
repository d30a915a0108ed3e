//! Catalog error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or configuring the catalog.
///
/// The search pipeline itself never fails; these cover the edges around it.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Failed to read a snapshot or config file.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file held malformed JSON.
    #[error("Malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Tenant configuration could not be parsed.
    #[error("Invalid tenant config: {0}")]
    TenantConfig(#[from] toml::de::Error),

    /// The default tenant slug is not present in the registry.
    #[error("Default tenant not configured: {0}")]
    MissingDefaultTenant(String),

    /// Two tenants share a slug.
    #[error("Duplicate tenant slug: {0}")]
    DuplicateTenant(String),

    /// An import header row has no SKU column.
    #[error("Import must have a SKU column (sku, part_number, or partnumber)")]
    MissingSkuColumn,

    /// An import header is not in the field table and the policy rejects it.
    #[error("Unknown import header: {0}")]
    UnknownHeader(String),
}

/// Errors raised by a chassis master store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Chassis store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with an error.
    #[error("Chassis store query failed: {0}")]
    Query(String),
}

/// Errors raised by chassis range validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChassisError {
    /// A required request field was empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// The chassis master could not be queried.
    #[error(transparent)]
    Store(#[from] StoreError),
}
