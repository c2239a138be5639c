//! Savings goals and their contribution history.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A savings objective the user contributes toward over time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Goal {
    pub id: Uuid,
    pub name: String,
    pub icon: String,
    pub target_amount: f64,
    pub current_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributions: Vec<Contribution>,
}

impl Goal {
    pub fn new(name: impl Into<String>, icon: impl Into<String>, target_amount: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            icon: icon.into(),
            target_amount,
            current_amount: 0.0,
            target_date: None,
            contributions: Vec::new(),
        }
    }

    pub fn with_target_date(mut self, target_date: NaiveDate) -> Self {
        self.target_date = Some(target_date);
        self
    }

    /// Records a contribution and folds it into the running total.
    pub fn contribute(&mut self, amount: f64, date: NaiveDate, note: Option<String>) {
        self.contributions.push(Contribution { amount, date, note });
        self.current_amount += amount;
    }

    /// Completion ratio in `[0, 1]`; a zero target counts as complete.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= f64::EPSILON {
            1.0
        } else {
            (self.current_amount / self.target_amount).min(1.0)
        }
    }

    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }
}

impl Identifiable for Goal {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Goal {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Goal {
    fn display_label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

/// A single deposit toward a goal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contribution {
    pub amount: f64,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contribute_accumulates_and_tracks_progress() {
        let mut goal = Goal::new("Trip", "✈️", 1000.0);
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        goal.contribute(400.0, date, None);
        goal.contribute(600.0, date, Some("bonus".into()));
        assert_eq!(goal.current_amount, 1000.0);
        assert_eq!(goal.contributions.len(), 2);
        assert!(goal.is_reached());
        assert_eq!(goal.progress(), 1.0);
    }
}
