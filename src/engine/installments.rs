//! Fixed-count installment expansion.

use uuid::Uuid;

use crate::domain::transaction::{InstallmentSlot, Transaction};
use crate::engine::{schedule, EngineError};

/// Expands a template transaction into `count` installment records.
///
/// The template amount is split evenly; no remainder redistribution is
/// applied, so with amounts that do not divide evenly the series total can
/// drift from the template by floating-point residue. Due dates step one
/// calendar month per installment starting at the template's due date, and
/// descriptions gain an `(i/count)` suffix.
pub fn expand_installments(
    template: &Transaction,
    count: u32,
) -> Result<Vec<Transaction>, EngineError> {
    if count == 0 {
        return Err(EngineError::InvalidInstallmentCount(count));
    }
    let per_installment = template.amount / count as f64;
    let group_id = Uuid::new_v4();
    let mut series = Vec::with_capacity(count as usize);
    for index in 1..=count {
        let mut txn = template.clone();
        txn.id = Uuid::new_v4();
        txn.amount = per_installment;
        txn.due_date = schedule::shift_month(template.due_date, index as i32 - 1);
        txn.description = format!("{} ({}/{})", template.description, index, count);
        txn.installment = Some(InstallmentSlot {
            group_id,
            index,
            total: count,
            amount: per_installment,
        });
        txn.recurrence = None;
        series.push(txn);
    }
    Ok(series)
}
