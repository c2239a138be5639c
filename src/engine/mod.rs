//! The recurrence/installment/status engine.
//!
//! Pure date-driven rules: deriving a transaction's lifecycle status,
//! expanding a template into a fixed-count installment series, and expanding
//! a template into a periodic recurrence series. No I/O; callers persist the
//! results.

pub mod installments;
pub mod recurrence;
pub mod schedule;
pub mod status;

use thiserror::Error;

pub use installments::expand_installments;
pub use recurrence::{expand_recurrences, DEFAULT_OCCURRENCES};
pub use status::{derive_status, refresh_status};

/// Failures produced while validating series expansion input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Unknown recurrence kind: `{0}`")]
    InvalidRecurrenceKind(String),
    #[error("Installment count must be at least 1, got {0}")]
    InvalidInstallmentCount(u32),
    #[error("Occurrence count must be at least 1, got {0}")]
    InvalidOccurrenceCount(u32),
}
