use std::collections::HashMap;

use crate::storage::errors::StorageError;
use crate::storage::types::PersistentStorage;

#[derive(Debug, Default, Clone)]
pub struct InMemoryStorage {
    entry: HashMap<String, String>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        tracing::debug!("Creating new in-memory persistent storage");
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_empty()
    }
}

impl PersistentStorage for InMemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entry.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entry.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError> {
        self.entry.remove(key);
        Ok(())
    }
}
