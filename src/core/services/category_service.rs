use uuid::Uuid;

use crate::domain::category::{default_catalog, Category, CategoryKind};
use crate::storage::{load_collection, save_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

pub struct CategoryService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> CategoryService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Category> {
        load_collection(self.store, StorageKey::Categories)
    }

    fn save(&self, categories: &[Category]) -> ServiceResult<()> {
        save_collection(self.store, StorageKey::Categories, categories)?;
        Ok(())
    }

    pub fn list(&self) -> Vec<Category> {
        self.load()
    }

    pub fn get(&self, id: Uuid) -> Option<Category> {
        self.load().into_iter().find(|cat| cat.id == id)
    }

    pub fn add(&self, category: Category) -> ServiceResult<Uuid> {
        let mut categories = self.load();
        Self::validate_name(&categories, None, &category.name)?;
        let id = category.id;
        categories.push(category);
        self.save(&categories)?;
        Ok(id)
    }

    pub fn edit(&self, id: Uuid, changes: Category) -> ServiceResult<()> {
        let mut categories = self.load();
        Self::validate_name(&categories, Some(id), &changes.name)?;
        let category = categories
            .iter_mut()
            .find(|cat| cat.id == id)
            .ok_or(ServiceError::NotFound("Category"))?;
        category.name = changes.name;
        category.kind = changes.kind;
        category.color = changes.color;
        category.icon = changes.icon;
        self.save(&categories)
    }

    /// Removes a category. Transactions still pointing at it are left alone
    /// and render under the synthetic fallback bucket.
    pub fn remove(&self, id: Uuid) -> ServiceResult<()> {
        let mut categories = self.load();
        let before = categories.len();
        categories.retain(|cat| cat.id != id);
        if categories.len() == before {
            return Err(ServiceError::NotFound("Category"));
        }
        self.save(&categories)
    }

    /// Installs the built-in catalogs when the collection is empty.
    /// Returns how many categories were seeded.
    pub fn seed_defaults(&self) -> ServiceResult<usize> {
        let mut categories = self.load();
        if !categories.is_empty() {
            return Ok(0);
        }
        categories.extend(default_catalog(CategoryKind::Expense));
        categories.extend(default_catalog(CategoryKind::Income));
        let seeded = categories.len();
        self.save(&categories)?;
        tracing::info!(seeded, "default category catalog installed");
        Ok(seeded)
    }

    fn validate_name(
        categories: &[Category],
        exclude: Option<Uuid>,
        candidate: &str,
    ) -> ServiceResult<()> {
        let normalized = candidate.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            return Err(ServiceError::Invalid("Category name is required".into()));
        }
        let duplicate = categories.iter().any(|category| {
            let name = category.name.trim().to_ascii_lowercase();
            name == normalized && exclude.map_or(true, |id| category.id != id)
        });
        if duplicate {
            Err(ServiceError::Invalid(format!(
                "Category `{}` already exists",
                candidate
            )))
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn duplicate_names_are_rejected_case_insensitively() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);
        service
            .add(Category::new("Food", CategoryKind::Expense, "#ef4444", "🍔"))
            .unwrap();
        let err = service
            .add(Category::new("  food ", CategoryKind::Expense, "#fff", "🍟"))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Invalid(ref m) if m.contains("already exists")));
    }

    #[test]
    fn seed_defaults_only_fills_an_empty_collection() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);
        let seeded = service.seed_defaults().unwrap();
        assert_eq!(seeded, 13);
        assert_eq!(service.seed_defaults().unwrap(), 0);
        assert_eq!(service.list().len(), 13);
    }

    #[test]
    fn edit_replaces_fields_in_place() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);
        let id = service
            .add(Category::new("Food", CategoryKind::Expense, "#ef4444", "🍔"))
            .unwrap();
        service
            .edit(
                id,
                Category::new("Groceries", CategoryKind::Expense, "#00ff00", "🛒"),
            )
            .unwrap();
        let edited = service.get(id).unwrap();
        assert_eq!(edited.name, "Groceries");
        assert_eq!(edited.icon, "🛒");
    }

    #[test]
    fn remove_missing_category_fails() {
        let store = MemoryStore::new();
        let service = CategoryService::new(&store);
        assert!(service.remove(Uuid::new_v4()).is_err());
    }
}
