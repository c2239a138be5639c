use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::goal::Goal;
use crate::storage::{load_collection, save_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

pub struct GoalService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> GoalService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Goal> {
        load_collection(self.store, StorageKey::Goals)
    }

    fn save(&self, goals: &[Goal]) -> ServiceResult<()> {
        save_collection(self.store, StorageKey::Goals, goals)?;
        Ok(())
    }

    pub fn list(&self) -> Vec<Goal> {
        self.load()
    }

    pub fn get(&self, id: Uuid) -> Option<Goal> {
        self.load().into_iter().find(|goal| goal.id == id)
    }

    pub fn add(&self, goal: Goal) -> ServiceResult<Uuid> {
        if goal.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Goal name is required".into()));
        }
        if goal.target_amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Goal target must be greater than zero".into(),
            ));
        }
        let mut goals = self.load();
        let id = goal.id;
        goals.push(goal);
        self.save(&goals)?;
        Ok(id)
    }

    /// Appends a contribution and folds it into the goal's running total in
    /// a single write.
    pub fn contribute(
        &self,
        id: Uuid,
        amount: f64,
        date: NaiveDate,
        note: Option<String>,
    ) -> ServiceResult<()> {
        if amount <= 0.0 {
            return Err(ServiceError::Invalid(
                "Contribution must be greater than zero".into(),
            ));
        }
        let mut goals = self.load();
        let goal = goals
            .iter_mut()
            .find(|goal| goal.id == id)
            .ok_or(ServiceError::NotFound("Goal"))?;
        goal.contribute(amount, date, note);
        self.save(&goals)
    }

    pub fn remove(&self, id: Uuid) -> ServiceResult<()> {
        let mut goals = self.load();
        let before = goals.len();
        goals.retain(|goal| goal.id != id);
        if goals.len() == before {
            return Err(ServiceError::NotFound("Goal"));
        }
        self.save(&goals)
    }
}
