//! Business logic helpers for managing transactions.

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::transaction::{RecurrenceKind, Transaction};
use crate::engine::{self, DEFAULT_OCCURRENCES};
use crate::storage::{load_collection, save_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

/// Validated CRUD over the stored transaction collection, including series
/// expansion and payment confirmation.
pub struct TransactionService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> TransactionService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Transaction> {
        load_collection(self.store, StorageKey::Transactions)
    }

    fn save(&self, transactions: &[Transaction]) -> ServiceResult<()> {
        save_collection(self.store, StorageKey::Transactions, transactions)?;
        Ok(())
    }

    /// Returns all transactions with statuses recomputed as of today.
    pub fn list(&self) -> Vec<Transaction> {
        self.list_as_of(Utc::now().date_naive())
    }

    /// Returns all transactions with statuses recomputed as of `today`.
    /// The refreshed statuses are not written back; reads stay reads.
    pub fn list_as_of(&self, today: NaiveDate) -> Vec<Transaction> {
        let mut transactions = self.load();
        for txn in &mut transactions {
            engine::refresh_status(txn, today);
        }
        transactions
    }

    pub fn get(&self, id: Uuid) -> ServiceResult<Transaction> {
        self.load()
            .into_iter()
            .find(|txn| txn.id == id)
            .ok_or(ServiceError::NotFound("Transaction"))
    }

    /// Adds a single transaction and returns its identifier.
    pub fn add(&self, transaction: Transaction) -> ServiceResult<Uuid> {
        Self::validate(&transaction)?;
        let id = transaction.id;
        let mut transactions = self.load();
        transactions.push(transaction);
        self.save(&transactions)?;
        Ok(id)
    }

    /// Expands the template into an installment series and persists the
    /// whole batch. Returns the generated ids in series order.
    pub fn add_installments(
        &self,
        template: &Transaction,
        count: u32,
    ) -> ServiceResult<Vec<Uuid>> {
        Self::validate(template)?;
        let series = engine::expand_installments(template, count)?;
        let ids = series.iter().map(|txn| txn.id).collect();
        let mut transactions = self.load();
        transactions.extend(series);
        self.save(&transactions)?;
        tracing::info!(count, "installment series persisted");
        Ok(ids)
    }

    /// Expands the template into a recurrence series and persists the whole
    /// batch. `occurrences = None` generates the default twelve.
    pub fn add_recurrences(
        &self,
        template: &Transaction,
        kind: RecurrenceKind,
        occurrences: Option<u32>,
    ) -> ServiceResult<Vec<Uuid>> {
        Self::validate(template)?;
        let occurrences = occurrences.unwrap_or(DEFAULT_OCCURRENCES);
        let series = engine::expand_recurrences(template, kind, occurrences)?;
        let ids = series.iter().map(|txn| txn.id).collect();
        let mut transactions = self.load();
        transactions.extend(series);
        self.save(&transactions)?;
        tracing::info!(occurrences, %kind, "recurrence series persisted");
        Ok(ids)
    }

    /// Updates the transaction identified by `id` via the provided mutator.
    pub fn update<F>(&self, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        let mut transactions = self.load();
        let txn = transactions
            .iter_mut()
            .find(|txn| txn.id == id)
            .ok_or(ServiceError::NotFound("Transaction"))?;
        mutator(txn);
        txn.touch();
        self.save(&transactions)
    }

    /// Confirms payment: records the settled value and date, moving the
    /// status to paid in the same write.
    pub fn settle(
        &self,
        id: Uuid,
        paid_amount: f64,
        payment_date: NaiveDate,
    ) -> ServiceResult<()> {
        if paid_amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Paid amount must be greater than zero".into(),
            ));
        }
        self.update(id, |txn| txn.settle(paid_amount, payment_date))
    }

    /// Undoes a payment confirmation and re-derives the status from the due
    /// date so the stored record never claims paid without a settled value.
    pub fn reopen(&self, id: Uuid, today: NaiveDate) -> ServiceResult<()> {
        self.update(id, |txn| {
            txn.clear_payment();
            engine::refresh_status(txn, today);
        })
    }

    /// Removes a single transaction, returning the removed instance.
    /// Installment and recurrence siblings are left untouched.
    pub fn remove(&self, id: Uuid) -> ServiceResult<Transaction> {
        let mut transactions = self.load();
        let position = transactions
            .iter()
            .position(|txn| txn.id == id)
            .ok_or(ServiceError::NotFound("Transaction"))?;
        let removed = transactions.remove(position);
        self.save(&transactions)?;
        Ok(removed)
    }

    /// Removes every transaction sharing the given installment or
    /// recurrence group id, returning how many were deleted.
    pub fn remove_series(&self, group_id: Uuid) -> ServiceResult<usize> {
        let mut transactions = self.load();
        let before = transactions.len();
        transactions.retain(|txn| txn.series_group() != Some(group_id));
        let removed = before - transactions.len();
        if removed == 0 {
            return Err(ServiceError::NotFound("Series"));
        }
        self.save(&transactions)?;
        tracing::info!(%group_id, removed, "series removed");
        Ok(removed)
    }

    fn validate(transaction: &Transaction) -> ServiceResult<()> {
        if transaction.description.trim().is_empty() {
            return Err(ServiceError::Invalid("Description is required".into()));
        }
        if transaction.amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Amount must be greater than zero".into(),
            ));
        }
        if let Some(method) = transaction.payment_method {
            if method.requires_card() && transaction.card_id.is_none() {
                return Err(ServiceError::Invalid(format!(
                    "{} requires a card",
                    method.label()
                )));
            }
        }
        Ok(())
    }
}
