use uuid::Uuid;

use crate::domain::card::Card;
use crate::storage::{load_collection, save_collection, StorageBackend, StorageKey};

use super::{ServiceError, ServiceResult};

pub struct CardService<'s> {
    store: &'s dyn StorageBackend,
}

impl<'s> CardService<'s> {
    pub fn new(store: &'s dyn StorageBackend) -> Self {
        Self { store }
    }

    fn load(&self) -> Vec<Card> {
        load_collection(self.store, StorageKey::Cards)
    }

    fn save(&self, cards: &[Card]) -> ServiceResult<()> {
        save_collection(self.store, StorageKey::Cards, cards)?;
        Ok(())
    }

    pub fn list(&self) -> Vec<Card> {
        self.load()
    }

    pub fn get(&self, id: Uuid) -> Option<Card> {
        self.load().into_iter().find(|card| card.id == id)
    }

    pub fn add(&self, card: Card) -> ServiceResult<Uuid> {
        if card.name.trim().is_empty() {
            return Err(ServiceError::Invalid("Card name is required".into()));
        }
        if card.last4.len() != 4 || !card.last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(ServiceError::Invalid(
                "Card must be identified by its last four digits".into(),
            ));
        }
        let mut cards = self.load();
        let id = card.id;
        cards.push(card);
        self.save(&cards)?;
        Ok(id)
    }

    pub fn edit(&self, id: Uuid, changes: Card) -> ServiceResult<()> {
        let mut cards = self.load();
        let card = cards
            .iter_mut()
            .find(|card| card.id == id)
            .ok_or(ServiceError::NotFound("Card"))?;
        card.name = changes.name;
        card.last4 = changes.last4;
        card.kind = changes.kind;
        card.brand = changes.brand;
        card.limit = changes.limit;
        card.color = changes.color;
        self.save(&cards)
    }

    pub fn remove(&self, id: Uuid) -> ServiceResult<()> {
        let mut cards = self.load();
        let before = cards.len();
        cards.retain(|card| card.id != id);
        if cards.len() == before {
            return Err(ServiceError::NotFound("Card"));
        }
        self.save(&cards)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardKind;
    use crate::storage::MemoryStore;

    #[test]
    fn last4_must_be_four_digits() {
        let store = MemoryStore::new();
        let service = CardService::new(&store);
        assert!(service
            .add(Card::new("Main", "12a4", CardKind::Credit))
            .is_err());
        assert!(service
            .add(Card::new("Main", "123", CardKind::Credit))
            .is_err());
        assert!(service
            .add(Card::new("Main", "0234", CardKind::Credit))
            .is_ok());
    }

    #[test]
    fn add_edit_remove_cycle() {
        let store = MemoryStore::new();
        let service = CardService::new(&store);
        let id = service
            .add(Card::new("Main", "1234", CardKind::Credit).with_limit(5000.0))
            .unwrap();
        service
            .edit(id, Card::new("Travel", "1234", CardKind::Multiple))
            .unwrap();
        assert_eq!(service.get(id).unwrap().name, "Travel");
        service.remove(id).unwrap();
        assert!(service.list().is_empty());
    }
}
