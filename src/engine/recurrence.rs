//! Open-ended recurrence expansion.

use std::str::FromStr;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::transaction::{RecurrenceKind, RecurrenceTag, Transaction};
use crate::engine::{schedule, EngineError};

/// Occurrences generated when the caller does not say otherwise.
pub const DEFAULT_OCCURRENCES: u32 = 12;

/// Advances a due date by `steps` intervals of the given kind.
///
/// Biweekly steps 15 days, not 14: the tracker has always treated
/// "biweekly" as twice-a-month on a 15-day stride, and stored data depends
/// on it.
pub fn advance(kind: RecurrenceKind, from: NaiveDate, steps: u32) -> NaiveDate {
    match kind {
        RecurrenceKind::Monthly => schedule::shift_month(from, steps as i32),
        RecurrenceKind::Yearly => schedule::shift_year(from, steps as i32),
        RecurrenceKind::Weekly => schedule::shift_days(from, 7 * steps as i64),
        RecurrenceKind::Biweekly => schedule::shift_days(from, 15 * steps as i64),
    }
}

/// Expands a template transaction into `occurrences` periodic records.
///
/// Unlike installments the amount is carried unchanged on every occurrence.
/// Occurrence `i` (0-based) is due `i` intervals after the template's due
/// date, and the whole batch shares one recurrence group id.
pub fn expand_recurrences(
    template: &Transaction,
    kind: RecurrenceKind,
    occurrences: u32,
) -> Result<Vec<Transaction>, EngineError> {
    if occurrences == 0 {
        return Err(EngineError::InvalidOccurrenceCount(occurrences));
    }
    let group_id = Uuid::new_v4();
    let mut series = Vec::with_capacity(occurrences as usize);
    for i in 0..occurrences {
        let mut txn = template.clone();
        txn.id = Uuid::new_v4();
        txn.due_date = advance(kind, template.due_date, i);
        txn.recurrence = Some(RecurrenceTag {
            group_id,
            kind,
            active: true,
        });
        txn.installment = None;
        series.push(txn);
    }
    Ok(series)
}

impl FromStr for RecurrenceKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" => Ok(RecurrenceKind::Monthly),
            "yearly" => Ok(RecurrenceKind::Yearly),
            "weekly" => Ok(RecurrenceKind::Weekly),
            "biweekly" => Ok(RecurrenceKind::Biweekly),
            other => Err(EngineError::InvalidRecurrenceKind(other.to_owned())),
        }
    }
}
