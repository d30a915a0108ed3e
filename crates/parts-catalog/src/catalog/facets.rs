//! Listing facets derived from the snapshot.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::catalog::{Catalog, StockType};

/// A main category and its subcategories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub subcategories: Vec<String>,
}

/// Models for one vehicle make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleMake {
    pub make: String,
    pub models: Vec<String>,
}

impl Catalog {
    /// Main categories with their sorted subcategories, across every
    /// `|`-separated path.
    pub fn category_tree(&self) -> Vec<CategoryNode> {
        let mut tree: BTreeMap<&str, BTreeSet<&str>> = BTreeMap::new();

        for path in self.products().iter().flat_map(|p| p.categories.split('|')) {
            let mut parts = path.split('/').map(str::trim);
            let Some(main) = parts.next().filter(|m| !m.is_empty()) else {
                continue;
            };
            let subs = tree.entry(main).or_default();
            if let Some(sub) = parts.next().filter(|s| !s.is_empty()) {
                subs.insert(sub);
            }
        }

        tree.into_iter()
            .map(|(name, subs)| CategoryNode {
                name: name.to_string(),
                subcategories: subs.into_iter().map(str::to_string).collect(),
            })
            .collect()
    }

    /// Sorted main category names.
    pub fn category_names(&self) -> Vec<String> {
        self.category_tree().into_iter().map(|node| node.name).collect()
    }

    /// Distinct stock types, highest priority first.
    pub fn stock_types(&self) -> Vec<StockType> {
        let mut seen = HashSet::new();
        let mut types: Vec<StockType> = self
            .products()
            .iter()
            .map(|p| &p.stock_type)
            .filter(|t| **t != StockType::Unspecified && seen.insert(*t))
            .cloned()
            .collect();
        types.sort_by_key(StockType::priority);
        types
    }

    /// Makes with their sorted models, from the fitment index.
    pub fn vehicle_data(&self) -> Vec<VehicleMake> {
        self.fitment()
            .vehicle_data()
            .into_iter()
            .map(|(make, models)| VehicleMake {
                make,
                models: models.into_iter().collect(),
            })
            .collect()
    }
}
