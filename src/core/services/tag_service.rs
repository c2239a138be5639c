use uuid::Uuid;

use crate::domain::tag::Tag;
use crate::storage::{load_collection, save_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

pub struct TagService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> TagService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Tag> {
        load_collection(self.store, StorageKey::Tags)
    }

    fn save(&self, tags: &[Tag]) -> ServiceResult<()> {
        save_collection(self.store, StorageKey::Tags, tags)?;
        Ok(())
    }

    pub fn list(&self) -> Vec<Tag> {
        self.load()
    }

    pub fn add(&self, tag: Tag) -> ServiceResult<Uuid> {
        if tag.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Tag name is required".into()));
        }
        let mut tags = self.load();
        let duplicate = tags
            .iter()
            .any(|existing| existing.name.trim().eq_ignore_ascii_case(tag.name.trim()));
        if duplicate {
            return Err(ServiceError::Invalid(format!(
                "Tag `{}` already exists",
                tag.name
            )));
        }
        let id = tag.id;
        tags.push(tag);
        self.save(&tags)?;
        Ok(id)
    }

    pub fn edit(&self, id: Uuid, changes: Tag) -> ServiceResult<()> {
        let mut tags = self.load();
        let tag = tags
            .iter_mut()
            .find(|tag| tag.id == id)
            .ok_or(ServiceError::NotFound("Tag"))?;
        tag.name = changes.name;
        tag.color = changes.color;
        self.save(&tags)
    }

    pub fn remove(&self, id: Uuid) -> ServiceResult<()> {
        let mut tags = self.load();
        let before = tags.len();
        tags.retain(|tag| tag.id != id);
        if tags.len() == before {
            return Err(ServiceError::NotFound("Tag"));
        }
        self.save(&tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn duplicate_tag_names_are_rejected() {
        let store = MemoryStore::new();
        let service = TagService::new(&store);
        service.add(Tag::new("Urgent", "#ef4444")).unwrap();
        assert!(service.add(Tag::new(" urgent", "#000")).is_err());
    }

    #[test]
    fn edit_and_remove_cycle() {
        let store = MemoryStore::new();
        let service = TagService::new(&store);
        let id = service.add(Tag::new("Urgent", "#ef4444")).unwrap();
        service.edit(id, Tag::new("Planned", "#10b981")).unwrap();
        assert_eq!(service.list()[0].name, "Planned");
        service.remove(id).unwrap();
        assert!(service.list().is_empty());
    }
}
