//! Bulk product updates from tabular imports.
//!
//! Header names are resolved against a fixed alias table up front. Rows are
//! then compared against the current products to produce a plan of typed
//! field changes, which can be previewed before it is applied.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::catalog::{Product, StockType};
use crate::error::CatalogError;

/// A product field an import column can update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ProductField {
    Sku,
    Description,
    Price,
    Weight,
    Categories,
    StockType,
    InStock,
    AvailableNow,
    #[serde(rename = "available1to3Days")]
    Available1to3Days,
}

impl ProductField {
    /// Header aliases, lower-case.
    pub const ALIASES: &'static [(&'static str, ProductField)] = &[
        ("sku", ProductField::Sku),
        ("part_number", ProductField::Sku),
        ("partnumber", ProductField::Sku),
        ("description", ProductField::Description),
        ("title", ProductField::Description),
        ("name", ProductField::Description),
        ("price", ProductField::Price),
        ("price_usd", ProductField::Price),
        ("usd_price", ProductField::Price),
        ("weight", ProductField::Weight),
        ("weight_kg", ProductField::Weight),
        ("categories", ProductField::Categories),
        ("category", ProductField::Categories),
        ("stock_type", ProductField::StockType),
        ("stocktype", ProductField::StockType),
        ("type", ProductField::StockType),
        ("in_stock", ProductField::InStock),
        ("instock", ProductField::InStock),
        ("available", ProductField::InStock),
        ("available_now", ProductField::AvailableNow),
        ("availablenow", ProductField::AvailableNow),
        ("qty", ProductField::AvailableNow),
        ("quantity", ProductField::AvailableNow),
        ("stock", ProductField::AvailableNow),
        ("available_1_3", ProductField::Available1to3Days),
        ("available1to3days", ProductField::Available1to3Days),
    ];

    /// Resolve a header. Case and surrounding whitespace are ignored.
    pub fn from_header(header: &str) -> Option<Self> {
        let header = header.trim().to_lowercase();
        Self::ALIASES
            .iter()
            .find(|(alias, _)| *alias == header)
            .map(|(_, field)| *field)
    }

    /// JSON field name on [`Product`].
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductField::Sku => "sku",
            ProductField::Description => "description",
            ProductField::Price => "price",
            ProductField::Weight => "weight",
            ProductField::Categories => "categories",
            ProductField::StockType => "stockType",
            ProductField::InStock => "inStock",
            ProductField::AvailableNow => "availableNow",
            ProductField::Available1to3Days => "available1to3Days",
        }
    }

    /// Parse a cell for this field. Blank or unparseable cells are `None`.
    fn parse(&self, cell: &str) -> Option<FieldValue> {
        let cell = cell.trim();
        if cell.is_empty() {
            return None;
        }
        match self {
            ProductField::Price | ProductField::Weight => cell
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(FieldValue::Decimal),
            ProductField::AvailableNow | ProductField::Available1to3Days => {
                cell.parse::<i64>().ok().map(FieldValue::Integer)
            }
            ProductField::InStock => {
                let lower = cell.to_lowercase();
                Some(FieldValue::Flag(lower == "true" || lower == "1" || lower == "yes"))
            }
            ProductField::Description | ProductField::Categories | ProductField::StockType | ProductField::Sku => {
                Some(FieldValue::Text(cell.to_string()))
            }
        }
    }

    /// Current value of this field on a product.
    fn read(&self, product: &Product) -> Option<FieldValue> {
        match self {
            ProductField::Sku => Some(FieldValue::Text(product.sku.clone())),
            ProductField::Description => Some(FieldValue::Text(product.description.clone())),
            ProductField::Price => Some(FieldValue::Decimal(product.price)),
            ProductField::Weight => product.weight.map(FieldValue::Decimal),
            ProductField::Categories => Some(FieldValue::Text(product.categories.clone())),
            ProductField::StockType => Some(FieldValue::Text(product.stock_type.to_string())),
            ProductField::InStock => Some(FieldValue::Flag(product.in_stock)),
            ProductField::AvailableNow => Some(FieldValue::Integer(product.available_now)),
            ProductField::Available1to3Days => Some(FieldValue::Integer(product.available_1to3_days)),
        }
    }

    fn write(&self, product: &mut Product, value: &FieldValue) {
        match (self, value) {
            (ProductField::Sku, FieldValue::Text(v)) => product.sku = v.clone(),
            (ProductField::Description, FieldValue::Text(v)) => product.description = v.clone(),
            (ProductField::Price, FieldValue::Decimal(v)) => product.price = *v,
            (ProductField::Weight, FieldValue::Decimal(v)) => product.weight = Some(*v),
            (ProductField::Categories, FieldValue::Text(v)) => product.categories = v.clone(),
            (ProductField::StockType, FieldValue::Text(v)) => product.stock_type = StockType::from_name(v),
            (ProductField::InStock, FieldValue::Flag(v)) => product.in_stock = *v,
            (ProductField::AvailableNow, FieldValue::Integer(v)) => product.available_now = *v,
            (ProductField::Available1to3Days, FieldValue::Integer(v)) => product.available_1to3_days = *v,
            (field, value) => {
                tracing::warn!(field = field.as_str(), ?value, "ignoring mistyped import value");
            }
        }
    }
}

/// A typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Integer(i64),
    Decimal(f64),
    Text(String),
}

/// What to do with a header that is not in the alias table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownHeaderPolicy {
    /// Skip the column and log it.
    #[default]
    Ignore,
    /// Fail the import.
    Reject,
}

/// Column positions resolved from a header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMapping {
    sku_columns: Vec<usize>,
    fields: Vec<(usize, ProductField)>,
    ignored: Vec<String>,
}

impl HeaderMapping {
    /// Resolve a header row.
    ///
    /// A SKU column is always required. Unknown headers follow `policy`.
    pub fn resolve<S: AsRef<str>>(headers: &[S], policy: UnknownHeaderPolicy) -> Result<Self, CatalogError> {
        let mut sku_columns = Vec::new();
        let mut fields = Vec::new();
        let mut ignored = Vec::new();

        for (index, header) in headers.iter().enumerate() {
            match ProductField::from_header(header.as_ref()) {
                Some(ProductField::Sku) => sku_columns.push(index),
                Some(field) => fields.push((index, field)),
                None => {
                    let header = header.as_ref().trim().to_string();
                    if policy == UnknownHeaderPolicy::Reject {
                        return Err(CatalogError::UnknownHeader(header));
                    }
                    tracing::warn!(header = %header, "ignoring unknown import header");
                    ignored.push(header);
                }
            }
        }

        if sku_columns.is_empty() {
            return Err(CatalogError::MissingSkuColumn);
        }

        Ok(Self {
            sku_columns,
            fields,
            ignored,
        })
    }

    /// Mapped non-SKU columns as `(column index, field)`.
    pub fn fields(&self) -> &[(usize, ProductField)] {
        &self.fields
    }

    /// Headers skipped under [`UnknownHeaderPolicy::Ignore`].
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }

    fn sku<'r>(&self, row: &'r [String]) -> Option<&'r str> {
        self.sku_columns
            .iter()
            .filter_map(|&i| row.get(i))
            .map(|cell| cell.trim())
            .find(|cell| !cell.is_empty())
    }
}

/// One field that would change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: ProductField,
    pub old: Option<FieldValue>,
    pub new: FieldValue,
}

/// Changes for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub sku: String,
    pub changes: Vec<FieldChange>,
}

/// A row that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowError {
    /// 1-based line number, counting the header as line 1.
    pub row: usize,
    pub error: String,
}

/// Everything an import would do.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPlan {
    pub total_rows: usize,
    pub updates: Vec<ProductUpdate>,
    pub not_found: Vec<String>,
    pub errors: Vec<RowError>,
}

impl ImportPlan {
    /// Whether applying would change nothing.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty()
    }
}

/// Compare rows against products. Only values that differ become changes.
pub fn plan_updates(products: &[Product], mapping: &HeaderMapping, rows: &[Vec<String>]) -> ImportPlan {
    let by_sku: HashMap<&str, &Product> = products.iter().map(|p| (p.sku.as_str(), p)).collect();
    let mut plan = ImportPlan {
        total_rows: rows.len(),
        ..Default::default()
    };

    for (index, row) in rows.iter().enumerate() {
        let Some(sku) = mapping.sku(row) else {
            plan.errors.push(RowError {
                row: index + 2,
                error: "Missing SKU".to_string(),
            });
            continue;
        };

        let Some(product) = by_sku.get(sku) else {
            plan.not_found.push(sku.to_string());
            continue;
        };

        let mut changes: Vec<FieldChange> = Vec::new();
        for &(column, field) in mapping.fields() {
            let Some(new) = row.get(column).and_then(|cell| field.parse(cell)) else {
                continue;
            };
            // A later column for the same field wins.
            changes.retain(|c| c.field != field);
            let old = field.read(product);
            if old.as_ref() != Some(&new) {
                changes.push(FieldChange { field, old, new });
            }
        }

        if !changes.is_empty() {
            plan.updates.push(ProductUpdate {
                sku: sku.to_string(),
                changes,
            });
        }
    }

    tracing::info!(
        rows = plan.total_rows,
        updates = plan.updates.len(),
        not_found = plan.not_found.len(),
        errors = plan.errors.len(),
        "import planned"
    );
    plan
}

/// Write a plan's changes into the products. Returns how many were updated.
pub fn apply(products: &mut [Product], plan: &ImportPlan) -> usize {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(products.len());
    for (i, product) in products.iter().enumerate() {
        index.entry(product.sku.clone()).or_insert(i);
    }

    let mut updated = 0;
    for update in &plan.updates {
        let Some(&i) = index.get(&update.sku) else {
            continue;
        };
        for change in &update.changes {
            change.field.write(&mut products[i], &change.new);
        }
        updated += 1;
    }
    updated
}
