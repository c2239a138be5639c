//! Domain types for tracked transactions and their series metadata.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable};

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Expense => "Expense",
            TransactionKind::Income => "Income",
        };
        f.write_str(label)
    }
}

/// Lifecycle state derived from the payment fields and the due date.
///
/// Never authoritative on its own: readers recompute it through
/// [`crate::engine::derive_status`] before acting on it.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionStatus {
    Pending,
    Paid,
    Overdue,
    Scheduled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionStatus::Pending => "Pending",
            TransactionStatus::Paid => "Paid",
            TransactionStatus::Overdue => "Overdue",
            TransactionStatus::Scheduled => "Scheduled",
        };
        f.write_str(label)
    }
}

/// How a settled transaction was paid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    Debit,
    Credit,
    Pix,
    Boleto,
    Cash,
    Transfer,
}

impl PaymentMethod {
    /// Whether this method must reference a registered card.
    pub fn requires_card(&self) -> bool {
        matches!(self, PaymentMethod::Debit | PaymentMethod::Credit)
    }

    /// Whether this method supports splitting into installments.
    pub fn allows_installments(&self) -> bool {
        matches!(self, PaymentMethod::Credit)
    }

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Debit => "Debit card",
            PaymentMethod::Credit => "Credit card",
            PaymentMethod::Pix => "PIX",
            PaymentMethod::Boleto => "Boleto",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Transfer => "Bank transfer",
        }
    }
}

/// Calendar interval of a recurrence series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecurrenceKind {
    Monthly,
    Yearly,
    Weekly,
    Biweekly,
}

impl fmt::Display for RecurrenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecurrenceKind::Monthly => "Monthly",
            RecurrenceKind::Yearly => "Yearly",
            RecurrenceKind::Weekly => "Weekly",
            RecurrenceKind::Biweekly => "Biweekly",
        };
        f.write_str(label)
    }
}

/// Position of a transaction inside a fixed-count installment series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstallmentSlot {
    pub group_id: Uuid,
    /// 1-based position within the series.
    pub index: u32,
    pub total: u32,
    /// Per-installment share of the original template amount.
    pub amount: f64,
}

/// Membership of a transaction in an open-ended recurrence series.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceTag {
    pub group_id: Uuid,
    pub kind: RecurrenceKind,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// A single tracked expense or income entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub kind: TransactionKind,
    pub description: String,
    /// Provisioned (expected) value.
    pub amount: f64,
    /// Actually settled value; presence alone marks the transaction settled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paid_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<Uuid>,
    pub due_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub status: TransactionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub installment: Option<InstallmentSlot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence: Option<RecurrenceTag>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    pub fn new(
        kind: TransactionKind,
        description: impl Into<String>,
        amount: f64,
        due_date: NaiveDate,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            kind,
            description: description.into(),
            amount,
            paid_amount: None,
            category_id: None,
            due_date,
            payment_date: None,
            status: TransactionStatus::Pending,
            payment_method: None,
            card_id: None,
            account_id: None,
            installment: None,
            recurrence: None,
            tags: Vec::new(),
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_account(mut self, account_id: Uuid) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_payment_method(mut self, method: PaymentMethod) -> Self {
        self.payment_method = Some(method);
        self
    }

    pub fn with_card(mut self, card_id: Uuid) -> Self {
        self.card_id = Some(card_id);
        self
    }

    /// Whether a settled value has been recorded.
    pub fn is_settled(&self) -> bool {
        self.paid_amount.is_some()
    }

    /// The settled value when present, otherwise the provisioned value.
    pub fn effective_amount(&self) -> f64 {
        self.paid_amount.unwrap_or(self.amount)
    }

    /// Records the settled value. Status moves to `Paid` in the same step,
    /// keeping the payment fields and the stored status in lockstep.
    pub fn settle(&mut self, paid_amount: f64, payment_date: NaiveDate) {
        self.paid_amount = Some(paid_amount);
        self.payment_date = Some(payment_date);
        self.status = TransactionStatus::Paid;
        self.touch();
    }

    /// Clears the payment fields. The caller must recompute the status
    /// against a reference date before the record is read again.
    pub fn clear_payment(&mut self) {
        self.paid_amount = None;
        self.payment_date = None;
        self.touch();
    }

    /// The series group this transaction belongs to, if any.
    pub fn series_group(&self) -> Option<Uuid> {
        self.installment
            .as_ref()
            .map(|slot| slot.group_id)
            .or_else(|| self.recurrence.as_ref().map(|tag| tag.group_id))
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for Transaction {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!("{} [{}]", self.description, self.status)
    }
}
