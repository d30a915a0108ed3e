//! In-memory catalog snapshot and its loader.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::catalog::{Product, SupersessionTable};
use crate::error::CatalogError;
use crate::fitment::{ChassisRecord, FitmentIndex, FitmentRecord};

/// Product export file name.
pub const PRODUCTS_FILE: &str = "products.json";
/// Fitment lookup file name.
pub const FITMENT_FILE: &str = "fitment-lookup.json";
/// Supersession lookup file name.
pub const SUPERSESSION_FILE: &str = "supersession-lookup.json";
/// Chassis master file name. Optional.
pub const CHASSIS_FILE: &str = "chassis-master.json";

/// An immutable snapshot of the product catalog.
///
/// Build once at startup and share behind an `Arc`; nothing here mutates
/// after construction.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    sku_index: HashMap<String, usize>,
    fitment: FitmentIndex,
    supersessions: SupersessionTable,
    chassis: Vec<ChassisRecord>,
}

impl Catalog {
    /// Build a catalog from already loaded parts.
    ///
    /// When two products share a SKU the first one wins for lookups.
    pub fn new(products: Vec<Product>, fitment: FitmentIndex, supersessions: SupersessionTable) -> Self {
        let mut sku_index = HashMap::with_capacity(products.len());
        for (i, product) in products.iter().enumerate() {
            sku_index.entry(product.sku.to_uppercase()).or_insert(i);
        }

        Self {
            products,
            sku_index,
            fitment,
            supersessions,
            chassis: Vec::new(),
        }
    }

    /// Attach chassis master records.
    pub fn with_chassis(mut self, chassis: Vec<ChassisRecord>) -> Self {
        self.chassis = chassis;
        self
    }

    /// Load the snapshot files from a data directory.
    ///
    /// A missing file loads as empty. Unreadable or malformed files are errors.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();

        let products: Vec<Product> = read_json(&dir.join(PRODUCTS_FILE))?.unwrap_or_default();

        let fitment = match read_text(&dir.join(FITMENT_FILE))? {
            Some(text) => FitmentIndex::from_json(&text).map_err(|source| CatalogError::Json {
                path: dir.join(FITMENT_FILE),
                source,
            })?,
            None => FitmentIndex::new(),
        };

        let supersessions = match read_text(&dir.join(SUPERSESSION_FILE))? {
            Some(text) => SupersessionTable::from_json(&text).map_err(|source| CatalogError::Json {
                path: dir.join(SUPERSESSION_FILE),
                source,
            })?,
            None => SupersessionTable::new(),
        };

        let chassis: Vec<ChassisRecord> = read_json(&dir.join(CHASSIS_FILE))?.unwrap_or_default();

        tracing::info!(
            products = products.len(),
            fitment = fitment.len(),
            supersessions = supersessions.len(),
            chassis = chassis.len(),
            dir = %dir.display(),
            "catalog loaded"
        );

        Ok(Self::new(products, fitment, supersessions).with_chassis(chassis))
    }

    /// All products in export order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn fitment(&self) -> &FitmentIndex {
        &self.fitment
    }

    pub fn supersessions(&self) -> &SupersessionTable {
        &self.supersessions
    }

    /// Chassis master records, possibly empty.
    pub fn chassis(&self) -> &[ChassisRecord] {
        &self.chassis
    }

    /// Case-insensitive product lookup.
    pub fn get(&self, sku: &str) -> Option<&Product> {
        self.sku_index
            .get(&sku.trim().to_uppercase())
            .map(|&i| &self.products[i])
    }

    /// Fitment records for a product's parent SKU, or its own SKU when it has
    /// no parent.
    pub fn fitment_for(&self, product: &Product) -> &[FitmentRecord] {
        self.fitment.records(product.fitment_key())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn read_text(path: &Path) -> Result<Option<String>, CatalogError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "snapshot file missing, using empty data");
            Ok(None)
        }
        Err(source) => Err(CatalogError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, CatalogError> {
    let Some(text) = read_text(path)? else {
        return Ok(None);
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })
}
