//! Keyed JSON persistence.
//!
//! Every collection lives as one serialized blob under a named key. Reads
//! that fail to parse degrade to an empty collection and a warning; writes
//! propagate their failure to the caller.

pub mod json_backend;

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{FinanceError, Result};

pub use json_backend::JsonStore;

/// Named slots in the backing store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Transactions,
    Categories,
    Cards,
    Accounts,
    Goals,
    Tags,
}

impl StorageKey {
    pub const ALL: [StorageKey; 6] = [
        StorageKey::Transactions,
        StorageKey::Categories,
        StorageKey::Cards,
        StorageKey::Accounts,
        StorageKey::Goals,
        StorageKey::Tags,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Transactions => "transactions",
            StorageKey::Categories => "categories",
            StorageKey::Cards => "cards",
            StorageKey::Accounts => "accounts",
            StorageKey::Goals => "goals",
            StorageKey::Tags => "tags",
        }
    }
}

/// Abstraction over persistence backends that store JSON payloads by key.
pub trait StorageBackend: Send + Sync {
    /// Returns the raw payload under `key`, or `None` when nothing was saved.
    fn read(&self, key: StorageKey) -> Result<Option<String>>;
    /// Replaces the payload under `key`.
    fn write(&self, key: StorageKey, payload: &str) -> Result<()>;
}

/// Loads and deserializes the collection stored under `key`.
///
/// Missing, unreadable, or malformed payloads all degrade to an empty
/// collection; the failure is logged, never surfaced.
pub fn load_collection<T: DeserializeOwned>(
    store: &dyn StorageBackend,
    key: StorageKey,
) -> Vec<T> {
    let raw = match store.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            tracing::warn!(key = key.as_str(), %err, "failed to read stored payload, using empty set");
            return Vec::new();
        }
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(err) => {
            tracing::warn!(key = key.as_str(), %err, "stored payload is malformed, using empty set");
            Vec::new()
        }
    }
}

/// Serializes and stores a collection under `key`. Write failures propagate.
pub fn save_collection<T: Serialize>(
    store: &dyn StorageBackend,
    key: StorageKey,
    items: &[T],
) -> Result<()> {
    let json = serde_json::to_string_pretty(items)?;
    store.write(key, &json)
}

/// Volatile backend backed by a map, for tests and previews.
#[derive(Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<StorageKey, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStore {
    fn read(&self, key: StorageKey) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| FinanceError::Storage("memory store lock poisoned".into()))?;
        Ok(slots.get(&key).cloned())
    }

    fn write(&self, key: StorageKey, payload: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| FinanceError::Storage("memory store lock poisoned".into()))?;
        slots.insert(key, payload.to_owned());
        Ok(())
    }
}
