//! Chassis master records and the store they are read from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One chassis in a make/model's production run.
///
/// Chassis codes do not sort lexically; `sort_order` is the canonical
/// chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChassisRecord {
    pub make: String,
    pub model: String,
    pub chassis: String,
    pub year_start: i32,
    #[serde(default)]
    pub year_end: Option<i32>,
    pub sort_order: i64,
}

impl ChassisRecord {
    pub fn new(
        make: impl Into<String>,
        model: impl Into<String>,
        chassis: impl Into<String>,
        sort_order: i64,
    ) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            chassis: chassis.into(),
            year_start: 0,
            year_end: None,
            sort_order,
        }
    }

    /// Set the production years.
    pub fn with_years(mut self, year_start: i32, year_end: Option<i32>) -> Self {
        self.year_start = year_start;
        self.year_end = year_end;
        self
    }

    /// Last production year, falling back to the first.
    pub fn last_year(&self) -> i32 {
        self.year_end.unwrap_or(self.year_start)
    }
}

/// Read access to the chassis master.
///
/// A record that does not exist is `Ok(None)` or an empty list. `Err` is
/// reserved for the store itself failing.
#[async_trait]
pub trait ChassisStore: Send + Sync {
    /// Exact lookup of one chassis code.
    async fn find(&self, make: &str, model: &str, chassis: &str) -> Result<Option<ChassisRecord>, StoreError>;

    /// Chassis whose code starts with `prefix`, ignoring case, at most `limit`.
    async fn with_prefix(
        &self,
        make: &str,
        model: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<ChassisRecord>, StoreError>;

    /// Chassis ordered by sort order, at most `limit`.
    async fn ordered(
        &self,
        make: &str,
        model: &str,
        ascending: bool,
        limit: usize,
    ) -> Result<Vec<ChassisRecord>, StoreError>;

    /// Number of chassis for the make/model.
    async fn count(&self, make: &str, model: &str) -> Result<usize, StoreError>;
}

/// Chassis store over records held in memory, such as `chassis-master.json`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryChassisStore {
    records: Vec<ChassisRecord>,
}

impl InMemoryChassisStore {
    /// Create a store. Records are kept in sort order.
    pub fn new(mut records: Vec<ChassisRecord>) -> Self {
        records.sort_by_key(|r| r.sort_order);
        Self { records }
    }

    /// Parse a JSON array of chassis records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    fn for_model<'a>(&'a self, make: &'a str, model: &'a str) -> impl DoubleEndedIterator<Item = &'a ChassisRecord> + 'a {
        self.records
            .iter()
            .filter(move |r| r.make == make && r.model == model && !r.chassis.is_empty())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl ChassisStore for InMemoryChassisStore {
    async fn find(&self, make: &str, model: &str, chassis: &str) -> Result<Option<ChassisRecord>, StoreError> {
        Ok(self.for_model(make, model).find(|r| r.chassis == chassis).cloned())
    }

    async fn with_prefix(
        &self,
        make: &str,
        model: &str,
        prefix: &str,
        limit: usize,
    ) -> Result<Vec<ChassisRecord>, StoreError> {
        let prefix = prefix.to_uppercase();
        Ok(self
            .for_model(make, model)
            .filter(|r| r.chassis.to_uppercase().starts_with(&prefix))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ordered(
        &self,
        make: &str,
        model: &str,
        ascending: bool,
        limit: usize,
    ) -> Result<Vec<ChassisRecord>, StoreError> {
        let records = self.for_model(make, model);
        let ordered: Vec<ChassisRecord> = if ascending {
            records.take(limit).cloned().collect()
        } else {
            records.rev().take(limit).cloned().collect()
        };
        Ok(ordered)
    }

    async fn count(&self, make: &str, model: &str) -> Result<usize, StoreError> {
        Ok(self.for_model(make, model).count())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> InMemoryChassisStore {
        InMemoryChassisStore::new(vec![
            ChassisRecord::new("Bentley", "Arnage", "LCH00003", 3),
            ChassisRecord::new("Bentley", "Arnage", "LCH00001", 1),
            ChassisRecord::new("Bentley", "Arnage", "LCX00002", 2),
            ChassisRecord::new("Bentley", "Azure", "LCH00009", 9),
        ])
    }

    #[tokio::test]
    async fn test_find_is_scoped_to_model() {
        let store = store();
        assert!(store.find("Bentley", "Arnage", "LCH00001").await.unwrap().is_some());
        assert!(store.find("Bentley", "Arnage", "LCH00009").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_with_prefix_limits() {
        let store = store();
        let found = store.with_prefix("Bentley", "Arnage", "lch", 1).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].chassis, "LCH00001");
    }

    #[tokio::test]
    async fn test_ordered_both_directions() {
        let store = store();
        let first = store.ordered("Bentley", "Arnage", true, 2).await.unwrap();
        let last = store.ordered("Bentley", "Arnage", false, 2).await.unwrap();

        let codes = |rs: &[ChassisRecord]| rs.iter().map(|r| r.chassis.clone()).collect::<Vec<_>>();
        assert_eq!(codes(&first), vec!["LCH00001", "LCX00002"]);
        assert_eq!(codes(&last), vec!["LCH00003", "LCX00002"]);
        assert_eq!(store.count("Bentley", "Arnage").await.unwrap(), 3);
    }
}
