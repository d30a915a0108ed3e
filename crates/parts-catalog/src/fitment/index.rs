//! Parent SKU to vehicle fitment index.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::catalog::product::null_default;

/// One vehicle a part fits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct FitmentRecord {
    #[serde(default, deserialize_with = "null_default")]
    pub make: String,
    #[serde(default, deserialize_with = "null_default")]
    pub model: String,
    /// First chassis in the applicability window.
    #[serde(default, deserialize_with = "chassis_code")]
    pub chassis_start: Option<String>,
    /// Last chassis in the applicability window.
    #[serde(default, deserialize_with = "chassis_code")]
    pub chassis_end: Option<String>,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl FitmentRecord {
    pub fn new(make: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            ..Default::default()
        }
    }

    /// Set the chassis window.
    pub fn with_chassis(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.chassis_start = Some(start.into());
        self.chassis_end = Some(end.into());
        self
    }
}

/// Chassis codes are exported as strings or bare integers.
fn chassis_code<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Option::<Code>::deserialize(deserializer)? {
        Some(Code::Text(s)) if s.trim().is_empty() => None,
        Some(Code::Text(s)) => Some(s),
        Some(Code::Int(n)) => Some(n.to_string()),
        Some(Code::Float(n)) => Some(n.to_string()),
        None => None,
    })
}

/// Fitment records grouped by parent SKU.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FitmentIndex {
    by_parent: BTreeMap<String, Vec<FitmentRecord>>,
}

impl FitmentIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record for a parent SKU.
    pub fn insert(&mut self, parent_sku: impl Into<String>, record: FitmentRecord) {
        self.by_parent.entry(parent_sku.into()).or_default().push(record);
    }

    /// Builder variant of [`FitmentIndex::insert`].
    pub fn with_record(mut self, parent_sku: impl Into<String>, record: FitmentRecord) -> Self {
        self.insert(parent_sku, record);
        self
    }

    /// Parse the `fitment-lookup.json` shape.
    ///
    /// Entries whose value is not an array are skipped, as are array items
    /// that do not look like fitment records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: BTreeMap<String, serde_json::Value> = serde_json::from_str(json)?;
        let mut index = Self::new();

        for (parent_sku, value) in raw {
            let serde_json::Value::Array(items) = value else {
                tracing::debug!(parent_sku = %parent_sku, "skipping non-array fitment entry");
                continue;
            };
            let records = items
                .into_iter()
                .filter_map(|item| serde_json::from_value::<FitmentRecord>(item).ok());
            index.by_parent.entry(parent_sku).or_default().extend(records);
        }

        Ok(index)
    }

    /// Records for a parent SKU, in stored order.
    pub fn records(&self, parent_sku: &str) -> &[FitmentRecord] {
        self.by_parent
            .get(parent_sku)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Parent SKUs with at least one record for the make.
    pub fn parent_skus_for_make(&self, make: &str) -> HashSet<&str> {
        self.parent_skus_where(|r| r.make == make)
    }

    /// Parent SKUs with at least one record for the model.
    pub fn parent_skus_for_model(&self, model: &str) -> HashSet<&str> {
        self.parent_skus_where(|r| r.model == model)
    }

    fn parent_skus_where(&self, predicate: impl Fn(&FitmentRecord) -> bool) -> HashSet<&str> {
        self.by_parent
            .iter()
            .filter(|(_, records)| records.iter().any(&predicate))
            .map(|(parent, _)| parent.as_str())
            .collect()
    }

    /// Make to sorted model names across every record.
    pub fn vehicle_data(&self) -> BTreeMap<String, BTreeSet<String>> {
        let mut vehicles: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for record in self.by_parent.values().flatten() {
            if record.make.is_empty() {
                continue;
            }
            let models = vehicles.entry(record.make.clone()).or_default();
            if !record.model.is_empty() {
                models.insert(record.model.clone());
            }
        }
        vehicles
    }

    /// Number of parent SKUs with fitment.
    pub fn len(&self) -> usize {
        self.by_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_parent.is_empty()
    }

    /// Iterate over `(parent_sku, records)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FitmentRecord])> {
        self.by_parent
            .iter()
            .map(|(parent, records)| (parent.as_str(), records.as_slice()))
    }
}
