//! Secure key-value storage facility

use crate::models::StorageKey;
use crate::utils::StorageError;
use async_trait::async_trait;

/// Platform-agnostic secure key-value storage
///
/// Implementations wrap whatever the host offers (Windows Credential Manager,
/// a SQLite table, an in-memory map). Encryption at rest, when there is any,
/// is the implementation's responsibility.
#[async_trait]
pub trait SecureStorage: Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - If a value exists
    /// * `Ok(None)` - If nothing is stored (not an error)
    /// * `Err(StorageError)` - If the facility rejected the read
    async fn get_item(&self, key: &StorageKey) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    async fn set_item(&self, key: &StorageKey, value: &str) -> Result<(), StorageError>;

    /// Delete the value under `key`
    ///
    /// # Returns
    /// * `Ok(())` - Success (idempotent - succeeds even if nothing is stored)
    async fn delete_item(&self, key: &StorageKey) -> Result<(), StorageError>;
}
