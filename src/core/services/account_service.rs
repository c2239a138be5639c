use uuid::Uuid;

use crate::domain::account::Account;
use crate::storage::{load_collection, save_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

pub struct AccountService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> AccountService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Account> {
        load_collection(self.store, StorageKey::Accounts)
    }

    fn save(&self, accounts: &[Account]) -> ServiceResult<()> {
        save_collection(self.store, StorageKey::Accounts, accounts)?;
        Ok(())
    }

    pub fn list(&self) -> Vec<Account> {
        self.load()
    }

    pub fn get(&self, id: Uuid) -> Option<Account> {
        self.load().into_iter().find(|account| account.id == id)
    }

    pub fn add(&self, account: Account) -> ServiceResult<Uuid> {
        if account.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Account name is required".into()));
        }
        let mut accounts = self.load();
        let duplicate = accounts
            .iter()
            .any(|existing| existing.name.trim().eq_ignore_ascii_case(account.name.trim()));
        if duplicate {
            return Err(ServiceError::Invalid(format!(
                "Account `{}` already exists",
                account.name
            )));
        }
        let id = account.id;
        accounts.push(account);
        self.save(&accounts)?;
        Ok(id)
    }

    pub fn edit(&self, id: Uuid, changes: Account) -> ServiceResult<()> {
        let mut accounts = self.load();
        let account = accounts
            .iter_mut()
            .find(|account| account.id == id)
            .ok_or(ServiceError::NotFound("Account"))?;
        account.name = changes.name;
        account.bank = changes.bank;
        account.balance = changes.balance;
        account.color = changes.color;
        self.save(&accounts)
    }

    pub fn remove(&self, id: Uuid) -> ServiceResult<()> {
        let mut accounts = self.load();
        let before = accounts.len();
        accounts.retain(|account| account.id != id);
        if accounts.len() == before {
            return Err(ServiceError::NotFound("Account"));
        }
        self.save(&accounts)
    }
}
