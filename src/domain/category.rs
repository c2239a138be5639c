//! Domain types representing transaction categories.

use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// Categorises transactions for budgeting and reporting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub kind: CategoryKind,
    pub color: String,
    pub icon: String,
    #[serde(default)]
    pub is_custom: bool,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        kind: CategoryKind,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            color: color.into(),
            icon: icon.into(),
            is_custom: true,
        }
    }

    /// Synthetic bucket used when a transaction references a category that
    /// no longer exists. Rendered in place of an error.
    pub fn fallback() -> Self {
        let mut category = Category::new("Other", CategoryKind::Expense, "#64748b", "📦");
        category.is_custom = false;
        category
    }
}

impl Identifiable for Category {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {} ({})", self.icon, self.name, self.kind)
    }
}

/// Supported category types.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CategoryKind {
    Expense,
    Income,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CategoryKind::Expense => "Expense",
            CategoryKind::Income => "Income",
        };
        f.write_str(label)
    }
}

static DEFAULT_EXPENSE_CATALOG: Lazy<Vec<(&str, &str, &str)>> = Lazy::new(|| {
    vec![
        ("Food", "🍔", "#ef4444"),
        ("Transport", "🚗", "#3b82f6"),
        ("Housing", "🏠", "#8b5cf6"),
        ("Health", "💊", "#ec4899"),
        ("Education", "🎓", "#14b8a6"),
        ("Leisure", "🎮", "#f59e0b"),
        ("Clothing", "👕", "#06b6d4"),
        ("Fixed bills", "📋", "#6366f1"),
        ("Other", "📦", "#64748b"),
    ]
});

static DEFAULT_INCOME_CATALOG: Lazy<Vec<(&str, &str, &str)>> = Lazy::new(|| {
    vec![
        ("Salary", "💰", "#10b981"),
        ("Freelance", "💼", "#3b82f6"),
        ("Investments", "📈", "#8b5cf6"),
        ("Other", "💵", "#64748b"),
    ]
});

/// Built-in catalog for the given kind, with fresh ids per call.
pub fn default_catalog(kind: CategoryKind) -> Vec<Category> {
    let entries = match kind {
        CategoryKind::Expense => &*DEFAULT_EXPENSE_CATALOG,
        CategoryKind::Income => &*DEFAULT_INCOME_CATALOG,
    };
    entries
        .iter()
        .map(|(name, icon, color)| {
            let mut category = Category::new(*name, kind, *color, *icon);
            category.is_custom = false;
            category
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalogs_cover_both_kinds() {
        let expenses = default_catalog(CategoryKind::Expense);
        let incomes = default_catalog(CategoryKind::Income);
        assert_eq!(expenses.len(), 9);
        assert_eq!(incomes.len(), 4);
        assert!(expenses.iter().all(|c| c.kind == CategoryKind::Expense));
        assert!(incomes.iter().all(|c| !c.is_custom));
    }

    #[test]
    fn fallback_is_the_synthetic_other_bucket() {
        let other = Category::fallback();
        assert_eq!(other.name, "Other");
        assert_eq!(other.color, "#64748b");
        assert!(!other.is_custom);
    }
}
