//! Lifecycle status derivation.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::domain::transaction::{Transaction, TransactionStatus};

/// Derives the lifecycle status of a transaction as of `today`.
///
/// A recorded settled value wins unconditionally, even for future due dates.
/// Otherwise the calendar decides: strictly past is `Overdue`, strictly
/// future is `Scheduled`, and a transaction due today is `Pending` (due
/// today means actionable today).
///
/// Pure: the caller owns writing the result back onto the record.
pub fn derive_status(transaction: &Transaction, today: NaiveDate) -> TransactionStatus {
    if transaction.is_settled() {
        return TransactionStatus::Paid;
    }
    match transaction.due_date.cmp(&today) {
        Ordering::Less => TransactionStatus::Overdue,
        Ordering::Equal => TransactionStatus::Pending,
        Ordering::Greater => TransactionStatus::Scheduled,
    }
}

/// Recomputes and stores the derived status on the record.
pub fn refresh_status(transaction: &mut Transaction, today: NaiveDate) {
    transaction.status = derive_status(transaction, today);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::transaction::TransactionKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn unpaid(due: NaiveDate) -> Transaction {
        Transaction::new(TransactionKind::Expense, "Internet", 120.0, due)
    }

    #[test]
    fn settled_is_paid_even_with_future_due_date() {
        let today = date(2024, 6, 10);
        let mut txn = unpaid(date(2024, 12, 25));
        txn.settle(120.0, today);
        assert_eq!(derive_status(&txn, today), TransactionStatus::Paid);
    }

    #[test]
    fn unpaid_before_today_is_overdue() {
        let today = date(2024, 6, 10);
        let txn = unpaid(date(2024, 6, 9));
        assert_eq!(derive_status(&txn, today), TransactionStatus::Overdue);
    }

    #[test]
    fn status_due_today_is_pending() {
        let today = date(2024, 6, 10);
        let txn = unpaid(today);
        assert_eq!(derive_status(&txn, today), TransactionStatus::Pending);
    }

    #[test]
    fn unpaid_after_today_is_scheduled() {
        let today = date(2024, 6, 10);
        let txn = unpaid(date(2024, 6, 11));
        assert_eq!(derive_status(&txn, today), TransactionStatus::Scheduled);
    }
}
