//! Vehicle fitment: which parts fit which vehicles, and chassis range checks.

mod chassis;
mod index;
mod validate;

pub use chassis::{ChassisRecord, ChassisStore, InMemoryChassisStore};
pub use index::{FitmentIndex, FitmentRecord};
pub use validate::{
    ChassisRef, ChassisSummary, ChassisValidator, IssueKind, SampleRange, Severity,
    ValidationIssue, ValidationResult, YearCoverage, DEFAULT_SUMMARY_LIMIT,
    LARGE_RANGE_THRESHOLD, MAX_SUGGESTIONS,
};
