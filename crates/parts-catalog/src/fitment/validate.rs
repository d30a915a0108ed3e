//! Chassis range validation against the chassis master.
//!
//! A fitment claims a part fits chassis `start` through `end`. Both codes
//! must exist for the make/model and `start` must not come after `end` in
//! production order. Lookups are cached because the master lives in a
//! remote store.

use std::time::Duration;

use parts_cache::{cache_key, Cache, TtlCache, DEFAULT_TTL};
use serde::{Deserialize, Serialize};

use crate::error::ChassisError;
use crate::fitment::{ChassisRecord, ChassisStore};

/// Sort order gap above which a range is flagged for review.
pub const LARGE_RANGE_THRESHOLD: u64 = 10_000;

/// Maximum suggestions returned for an unknown chassis code.
pub const MAX_SUGGESTIONS: usize = 5;

/// Default number of chassis sampled by [`ChassisValidator::chassis_summary`].
pub const DEFAULT_SUMMARY_LIMIT: usize = 100;

/// Number of leading characters used to look for similar chassis codes.
const SUGGESTION_PREFIX_LEN: usize = 3;

/// Kind of problem found with a range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    InvalidStart,
    InvalidEnd,
    InvertedRange,
    LargeRangeWarning,
}

impl IssueKind {
    /// Whether the issue makes the range invalid.
    pub fn is_blocking(&self) -> bool {
        !matches!(self, IssueKind::LargeRangeWarning)
    }
}

/// Severity attached to non-blocking issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
}

/// A problem found with a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    #[serde(rename = "type")]
    pub kind: IssueKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
    pub message: String,
}

impl ValidationIssue {
    fn error(kind: IssueKind, message: String) -> Self {
        Self {
            kind,
            severity: None,
            message,
        }
    }

    fn warning(kind: IssueKind, message: String) -> Self {
        Self {
            kind,
            severity: Some(Severity::Warning),
            message,
        }
    }
}

/// A chassis code with its production years.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChassisRef {
    pub chassis: String,
    pub year_start: i32,
    pub year_end: Option<i32>,
}

impl From<&ChassisRecord> for ChassisRef {
    fn from(record: &ChassisRecord) -> Self {
        Self {
            chassis: record.chassis.clone(),
            year_start: record.year_start,
            year_end: record.year_end,
        }
    }
}

/// Production years a valid range covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearCoverage {
    pub from: i32,
    pub to: i32,
}

/// Outcome of validating a chassis range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub make: String,
    pub model: String,
    pub chassis_start: String,
    pub chassis_end: String,
    pub valid: bool,
    pub issues: Vec<ValidationIssue>,
    pub start_valid: bool,
    pub end_valid: bool,
    pub start_sort_order: Option<i64>,
    pub end_sort_order: Option<i64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub start_suggestions: Vec<ChassisRef>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub end_suggestions: Vec<ChassisRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year_coverage: Option<YearCoverage>,
}

impl ValidationResult {
    /// Whether any issue of the given kind was recorded.
    pub fn has_issue(&self, kind: IssueKind) -> bool {
        self.issues.iter().any(|i| i.kind == kind)
    }
}

/// Earliest and latest chassis codes for a make/model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleRange {
    pub earliest: Option<String>,
    pub latest: Option<String>,
}

/// The ends of a make/model's chassis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChassisSummary {
    pub make: String,
    pub model: String,
    pub total_chassis: usize,
    /// Earliest chassis, ascending.
    pub first_chassis: Vec<ChassisRef>,
    /// Latest chassis, descending.
    pub last_chassis: Vec<ChassisRef>,
    pub sample_range: SampleRange,
}

/// Validates chassis ranges against a [`ChassisStore`], caching results.
///
/// Cached entries are served until they expire. Upstream changes are not
/// seen until then.
pub struct ChassisValidator<S> {
    store: S,
    validations: Box<dyn Cache<String, ValidationResult>>,
    summaries: Box<dyn Cache<String, ChassisSummary>>,
}

impl<S: ChassisStore> ChassisValidator<S> {
    /// Create a validator with 24 hour process-local caches.
    pub fn new(store: S) -> Self {
        Self::with_ttl(store, DEFAULT_TTL)
    }

    /// Create a validator with process-local caches of the given lifetime.
    pub fn with_ttl(store: S, ttl: Duration) -> Self {
        Self::with_caches(
            store,
            Box::new(TtlCache::<String, ValidationResult>::new(ttl)),
            Box::new(TtlCache::<String, ChassisSummary>::new(ttl)),
        )
    }

    /// Create a validator with caller-supplied caches.
    pub fn with_caches(
        store: S,
        validations: Box<dyn Cache<String, ValidationResult>>,
        summaries: Box<dyn Cache<String, ChassisSummary>>,
    ) -> Self {
        Self {
            store,
            validations,
            summaries,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Validate a chassis range. `chassis_end` defaults to `chassis_start`.
    ///
    /// An unknown chassis is a result with `valid == false`, not an error.
    /// Errors mean a required field was blank or the store failed.
    pub async fn validate(
        &self,
        make: &str,
        model: &str,
        chassis_start: &str,
        chassis_end: Option<&str>,
    ) -> Result<ValidationResult, ChassisError> {
        require("make", make)?;
        require("model", model)?;
        require("chassisStart", chassis_start)?;

        let start = chassis_start.trim().to_uppercase();
        let end = chassis_end
            .map(|e| e.trim().to_uppercase())
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| start.clone());

        let key = cache_key!("validate", make, model, start, end);
        if let Some(cached) = self.validations.get(&key) {
            tracing::debug!(key = %key, "chassis validation cache hit");
            return Ok(cached);
        }

        let start_record = self.store.find(make, model, &start).await?;
        let end_record = if end == start {
            start_record.clone()
        } else {
            self.store.find(make, model, &end).await?
        };

        let mut result = ValidationResult {
            make: make.to_string(),
            model: model.to_string(),
            chassis_start: start.clone(),
            chassis_end: end.clone(),
            valid: false,
            issues: Vec::new(),
            start_valid: start_record.is_some(),
            end_valid: end_record.is_some(),
            start_sort_order: start_record.as_ref().map(|r| r.sort_order),
            end_sort_order: end_record.as_ref().map(|r| r.sort_order),
            start_year: start_record.as_ref().map(|r| r.year_start),
            end_year: end_record.as_ref().and_then(|r| r.year_end),
            start_suggestions: Vec::new(),
            end_suggestions: Vec::new(),
            year_coverage: None,
        };

        if start_record.is_none() {
            result.issues.push(ValidationIssue::error(
                IssueKind::InvalidStart,
                format!("Chassis \"{start}\" not found for {make} {model}"),
            ));
            result.start_suggestions = self.suggestions(make, model, &start).await?;
        }

        if end != start && end_record.is_none() {
            result.issues.push(ValidationIssue::error(
                IssueKind::InvalidEnd,
                format!("Chassis \"{end}\" not found for {make} {model}"),
            ));
            result.end_suggestions = self.suggestions(make, model, &end).await?;
        }

        if let (Some(first), Some(last)) = (&start_record, &end_record) {
            if first.sort_order > last.sort_order {
                result.issues.push(ValidationIssue::error(
                    IssueKind::InvertedRange,
                    format!(
                        "Chassis range appears inverted: \"{start}\" comes after \"{end}\" chronologically. Did you mean {end} to {start}?"
                    ),
                ));
            }

            let gap = first.sort_order.abs_diff(last.sort_order);
            if gap > LARGE_RANGE_THRESHOLD {
                result.issues.push(ValidationIssue::warning(
                    IssueKind::LargeRangeWarning,
                    format!(
                        "This is a very wide chassis range ({} chassis). Please verify this is intentional.",
                        group_thousands(gap)
                    ),
                ));
            }
        }

        result.valid = result.start_valid
            && result.end_valid
            && !result.issues.iter().any(|i| i.kind.is_blocking());

        if result.valid {
            if let (Some(first), Some(last)) = (&start_record, &end_record) {
                result.year_coverage = Some(YearCoverage {
                    from: first.year_start.min(last.year_start),
                    to: first.last_year().max(last.last_year()),
                });
            }
        }

        tracing::debug!(
            make,
            model,
            start = %start,
            end = %end,
            valid = result.valid,
            issues = result.issues.len(),
            "chassis range validated"
        );

        self.validations.set(key, result.clone());
        Ok(result)
    }

    /// First and last `limit / 2` chassis for a make/model, with the total count.
    pub async fn chassis_summary(
        &self,
        make: &str,
        model: &str,
        limit: usize,
    ) -> Result<ChassisSummary, ChassisError> {
        require("make", make)?;
        require("model", model)?;

        let key = cache_key!("chassis-list", make, model);
        if let Some(cached) = self.summaries.get(&key) {
            tracing::debug!(key = %key, "chassis summary cache hit");
            return Ok(cached);
        }

        let half = limit / 2;
        let first = self.store.ordered(make, model, true, half).await?;
        let last = self.store.ordered(make, model, false, half).await?;
        let total_chassis = self.store.count(make, model).await?;

        let summary = ChassisSummary {
            make: make.to_string(),
            model: model.to_string(),
            total_chassis,
            sample_range: SampleRange {
                earliest: first.first().map(|r| r.chassis.clone()),
                latest: last.first().map(|r| r.chassis.clone()),
            },
            first_chassis: first.iter().map(ChassisRef::from).collect(),
            last_chassis: last.iter().map(ChassisRef::from).collect(),
        };

        self.summaries.set(key, summary.clone());
        Ok(summary)
    }

    async fn suggestions(&self, make: &str, model: &str, chassis: &str) -> Result<Vec<ChassisRef>, ChassisError> {
        let prefix: String = chassis.chars().take(SUGGESTION_PREFIX_LEN).collect();
        let found = self
            .store
            .with_prefix(make, model, &prefix, MAX_SUGGESTIONS)
            .await?;
        Ok(found.iter().map(ChassisRef::from).collect())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ChassisError> {
    if value.trim().is_empty() {
        Err(ChassisError::MissingField(field))
    } else {
        Ok(())
    }
}

/// Format an integer with `,` thousands separators.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
