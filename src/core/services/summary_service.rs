//! Reporting arithmetic over a date window.

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::category::Category;
use crate::domain::transaction::{Transaction, TransactionKind, TransactionStatus};
use crate::engine::derive_status;
use crate::engine::schedule::days_in_month;
use crate::storage::{load_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

/// Inclusive calendar range, typically one month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> ServiceResult<Self> {
        if end < start {
            return Err(ServiceError::Invalid(
                "Window end must not precede its start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`, first day through last day.
    pub fn month_of(date: NaiveDate) -> Self {
        let year = date.year();
        let month = date.month();
        let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)).unwrap();
        Self { start, end }
    }

    /// Both endpoints count as inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Expense volume attributed to one category within a window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    /// `None` marks the synthetic bucket for dangling category references.
    pub category_id: Option<Uuid>,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub total: f64,
}

/// Aggregated figures for one window.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthlySummary {
    pub window: DateWindow,
    /// Effective (settled-else-provisioned) totals per kind.
    pub provisioned_income: f64,
    pub provisioned_expense: f64,
    /// Settled values only, summed where the derived status is paid.
    pub settled_income: f64,
    pub settled_expense: f64,
    /// Income effective minus expense effective. Mixes provisioned and
    /// settled figures on both sides.
    pub balance: f64,
    /// Expense breakdown, descending by total.
    pub expense_by_category: Vec<CategoryTotal>,
}

/// Computes window aggregates from already-loaded data. Pure.
pub fn summarize(
    transactions: &[Transaction],
    categories: &[Category],
    window: DateWindow,
    today: NaiveDate,
) -> MonthlySummary {
    let in_window: Vec<&Transaction> = transactions
        .iter()
        .filter(|txn| window.contains(txn.due_date))
        .collect();

    let mut provisioned_income = 0.0;
    let mut provisioned_expense = 0.0;
    let mut settled_income = 0.0;
    let mut settled_expense = 0.0;

    for txn in &in_window {
        let effective = txn.effective_amount();
        match txn.kind {
            TransactionKind::Income => provisioned_income += effective,
            TransactionKind::Expense => provisioned_expense += effective,
        }
        if derive_status(txn, today) == TransactionStatus::Paid {
            let paid = txn.paid_amount.unwrap_or_default();
            match txn.kind {
                TransactionKind::Income => settled_income += paid,
                TransactionKind::Expense => settled_expense += paid,
            }
        }
    }

    let mut expense_by_category: Vec<CategoryTotal> = Vec::new();
    let fallback = Category::fallback();
    for txn in &in_window {
        if txn.kind != TransactionKind::Expense {
            continue;
        }
        let matched = txn
            .category_id
            .and_then(|id| categories.iter().find(|cat| cat.id == id));
        let (bucket_id, category) = match matched {
            Some(category) => (Some(category.id), category),
            None => (None, &fallback),
        };
        match expense_by_category
            .iter_mut()
            .find(|entry| entry.category_id == bucket_id)
        {
            Some(entry) => entry.total += txn.effective_amount(),
            None => expense_by_category.push(CategoryTotal {
                category_id: bucket_id,
                name: category.name.clone(),
                icon: category.icon.clone(),
                color: category.color.clone(),
                total: txn.effective_amount(),
            }),
        }
    }
    expense_by_category.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    MonthlySummary {
        window,
        provisioned_income,
        provisioned_expense,
        settled_income,
        settled_expense,
        balance: provisioned_income - provisioned_expense,
        expense_by_category,
    }
}

/// Loads the stored collections and computes window aggregates.
pub struct SummaryService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> SummaryService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    pub fn summarize_window(&self, window: DateWindow) -> MonthlySummary {
        self.summarize_window_as_of(window, Utc::now().date_naive())
    }

    pub fn summarize_window_as_of(&self, window: DateWindow, today: NaiveDate) -> MonthlySummary {
        let transactions: Vec<Transaction> = load_collection(self.store, StorageKey::Transactions);
        let categories: Vec<Category> = load_collection(self.store, StorageKey::Categories);
        summarize(&transactions, &categories, window, today)
    }

    pub fn summarize_month_of(&self, date: NaiveDate, today: NaiveDate) -> MonthlySummary {
        self.summarize_window_as_of(DateWindow::month_of(date), today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::category::CategoryKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(amount: f64, due: NaiveDate) -> Transaction {
        Transaction::new(TransactionKind::Expense, "spend", amount, due)
    }

    fn income(amount: f64, due: NaiveDate) -> Transaction {
        Transaction::new(TransactionKind::Income, "earn", amount, due)
    }

    #[test]
    fn month_window_is_inclusive_of_both_endpoints() {
        let window = DateWindow::month_of(date(2024, 2, 14));
        assert_eq!(window.start, date(2024, 2, 1));
        assert_eq!(window.end, date(2024, 2, 29));
        assert!(window.contains(window.start));
        assert!(window.contains(window.end));
        assert!(!window.contains(date(2024, 3, 1)));
    }

    #[test]
    fn invalid_window_is_rejected() {
        assert!(DateWindow::new(date(2024, 2, 2), date(2024, 2, 1)).is_err());
        assert!(DateWindow::new(date(2024, 2, 1), date(2024, 2, 1)).is_ok());
    }

    #[test]
    fn provisioned_and_settled_totals_split_correctly() {
        let today = date(2024, 2, 20);
        let mut paid = expense(100.0, date(2024, 2, 5));
        paid.settle(100.0, date(2024, 2, 5));
        let unpaid = expense(50.0, date(2024, 2, 15));

        let summary = summarize(
            &[paid, unpaid],
            &[],
            DateWindow::month_of(today),
            today,
        );
        assert_eq!(summary.provisioned_expense, 150.0);
        assert_eq!(summary.settled_expense, 100.0);
        assert_eq!(summary.settled_income, 0.0);
    }

    #[test]
    fn balance_uses_effective_amounts_on_both_sides() {
        let today = date(2024, 2, 20);
        let mut salary = income(3000.0, date(2024, 2, 1));
        salary.settle(3100.0, date(2024, 2, 1));
        let rent = expense(1200.0, date(2024, 2, 10));

        let summary = summarize(
            &[salary, rent],
            &[],
            DateWindow::month_of(today),
            today,
        );
        assert_eq!(summary.provisioned_income, 3100.0);
        assert_eq!(summary.balance, 3100.0 - 1200.0);
    }

    #[test]
    fn dangling_category_lands_in_the_other_bucket() {
        let today = date(2024, 2, 20);
        let food = Category::new("Food", CategoryKind::Expense, "#ef4444", "🍔");
        let groceries = expense(200.0, date(2024, 2, 3)).with_category(food.id);
        let orphan = expense(80.0, date(2024, 2, 4)).with_category(Uuid::new_v4());
        let orphan_too = expense(20.0, date(2024, 2, 5));

        let summary = summarize(
            &[groceries, orphan, orphan_too],
            &[food.clone()],
            DateWindow::month_of(today),
            today,
        );
        assert_eq!(summary.expense_by_category.len(), 2);
        // Sorted descending by total: Food 200, Other 100.
        assert_eq!(summary.expense_by_category[0].name, "Food");
        assert_eq!(summary.expense_by_category[0].total, 200.0);
        assert_eq!(summary.expense_by_category[1].name, "Other");
        assert_eq!(summary.expense_by_category[1].category_id, None);
        assert_eq!(summary.expense_by_category[1].total, 100.0);
    }

    #[test]
    fn transactions_outside_the_window_are_ignored() {
        let today = date(2024, 2, 20);
        let inside = expense(10.0, date(2024, 2, 29));
        let outside = expense(999.0, date(2024, 3, 1));
        let summary = summarize(
            &[inside, outside],
            &[],
            DateWindow::month_of(today),
            today,
        );
        assert_eq!(summary.provisioned_expense, 10.0);
    }
}
