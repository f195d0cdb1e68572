//! In-process storage facility. Nothing survives a restart.

use crate::core::SecureStorage;
use crate::models::StorageKey;
use crate::utils::sync::lock;
use crate::utils::StorageError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
pub struct MemoryStorage {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items().is_empty()
    }

    fn items(&self) -> MutexGuard<'_, HashMap<String, String>> {
        lock(&self.items, "memory_storage")
    }
}

#[async_trait]
impl SecureStorage for MemoryStorage {
    async fn get_item(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        Ok(self.items().get(key.as_str()).cloned())
    }

    async fn set_item(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.items()
            .insert(key.as_str().to_string(), value.to_string());
        Ok(())
    }

    async fn delete_item(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.items().remove(key.as_str());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_get_delete() {
        let storage = MemoryStorage::new();
        let key = StorageKey::new("k");

        assert_eq!(storage.get_item(&key).await.unwrap(), None);
        storage.set_item(&key, "v1").await.unwrap();
        storage.set_item(&key, "v2").await.unwrap();
        assert_eq!(storage.get_item(&key).await.unwrap().as_deref(), Some("v2"));
        assert_eq!(storage.len(), 1);

        storage.delete_item(&key).await.unwrap();
        storage.delete_item(&key).await.unwrap();
        assert!(storage.is_empty());
    }
}
