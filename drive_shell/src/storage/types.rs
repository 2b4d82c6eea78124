use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::storage::errors::StorageError;

/// Origin-scoped persistent key/value storage (the browser's `localStorage`).
pub trait PersistentStorage: Send + 'static {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Serialize `value` as JSON and store it under `key`.
pub fn put_json<T: Serialize>(
    storage: &mut dyn PersistentStorage,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let json = serde_json::to_string(value)?;
    storage.set_item(key, &json)
}

pub fn get_json<T: DeserializeOwned>(
    storage: &dyn PersistentStorage,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match storage.get_item(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}
