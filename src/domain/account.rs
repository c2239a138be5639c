use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A bank or cash account tracked by the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bank: Option<String>,
    pub balance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Account {
    pub fn new(name: impl Into<String>, balance: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            bank: None,
            balance,
            color: None,
        }
    }

    pub fn with_bank(mut self, bank: impl Into<String>) -> Self {
        self.bank = Some(bank.into());
        self
    }
}

impl Identifiable for Account {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Account {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Account {
    fn display_label(&self) -> String {
        match &self.bank {
            Some(bank) => format!("{} ({})", self.name, bank),
            None => self.name.clone(),
        }
    }
}
