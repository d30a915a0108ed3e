//! Old part number to current part number lookup.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Result of resolving a retired SKU.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupersessionMatch {
    pub old_sku: String,
    pub current_skus: Vec<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

impl From<OneOrMany> for Vec<String> {
    fn from(value: OneOrMany) -> Self {
        match value {
            OneOrMany::One(sku) => vec![sku],
            OneOrMany::Many(skus) => skus,
        }
    }
}

/// Supersession table keyed by upper-cased old SKU.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupersessionTable {
    entries: HashMap<String, Vec<String>>,
}

impl SupersessionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry. Empty replacement lists are ignored.
    pub fn insert(&mut self, old_sku: &str, current_skus: Vec<String>) {
        if current_skus.is_empty() {
            return;
        }
        self.entries
            .insert(old_sku.trim().to_uppercase(), current_skus);
    }

    /// Builder variant of [`SupersessionTable::insert`].
    pub fn with_entry<I, S>(mut self, old_sku: &str, current_skus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(old_sku, current_skus.into_iter().map(Into::into).collect());
        self
    }

    /// Parse the `supersession-lookup.json` shape: old SKU to a SKU or list of SKUs.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, OneOrMany> = serde_json::from_str(json)?;
        let mut table = Self::new();
        for (old_sku, current) in raw {
            table.insert(&old_sku, current.into());
        }
        Ok(table)
    }

    /// Exact, case-insensitive lookup.
    pub fn resolve(&self, query: &str) -> Option<SupersessionMatch> {
        let key = query.trim().to_uppercase();
        if key.is_empty() {
            return None;
        }
        self.entries.get(&key).map(|current| SupersessionMatch {
            old_sku: key,
            current_skus: current.clone(),
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
