use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A registered payment card.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: Uuid,
    pub name: String,
    /// Last four digits of the card number, kept as text to preserve zeros.
    pub last4: String,
    pub kind: CardKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Card {
    pub fn new(name: impl Into<String>, last4: impl Into<String>, kind: CardKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            last4: last4.into(),
            kind,
            brand: None,
            limit: None,
            color: None,
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn with_limit(mut self, limit: f64) -> Self {
        self.limit = Some(limit);
        self
    }
}

impl Identifiable for Card {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Card {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Card {
    fn display_label(&self) -> String {
        format!("{} •••• {}", self.name, self.last4)
    }
}

/// Supported card classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardKind {
    Credit,
    Debit,
    Multiple,
}
