use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A user-defined label attachable to transactions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub color: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            color: color.into(),
        }
    }
}

impl Identifiable for Tag {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Tag {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Tag {
    fn display_label(&self) -> String {
        self.name.clone()
    }
}
