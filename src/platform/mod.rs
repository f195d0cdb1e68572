//! Storage facility implementations
//!
//! All platform-specific code is isolated here. Windows Credential Manager is
//! only compiled on Windows; SQLite and the in-memory map work everywhere.

#[cfg(windows)]
pub mod credman;
pub mod memory;
pub mod sqlite;

#[cfg(windows)]
pub use credman::WindowsCredentialStorage;
pub use memory::MemoryStorage;
pub use sqlite::SqliteStorage;

use crate::config::{AppConfig, StorageBackend};
use crate::core::SecureStorage;
use crate::logger;
use crate::utils::ConfigError;
use std::sync::Arc;

/// Build the storage facility selected by `config`.
///
/// Also initialises the logger, since this is the first call an app makes.
pub fn open_storage(config: &AppConfig) -> Result<Arc<dyn SecureStorage>, ConfigError> {
    logger::init_logger();
    logger::log_info(&format!("Opening {:?} credential storage", config.storage));
    match config.storage {
        StorageBackend::Sqlite => Ok(Arc::new(SqliteStorage::open_in(&config.data_dir)?)),
        StorageBackend::Memory => Ok(Arc::new(MemoryStorage::new())),
        #[cfg(windows)]
        StorageBackend::CredMan => Ok(Arc::new(WindowsCredentialStorage::new())),
        #[cfg(not(windows))]
        StorageBackend::CredMan => Err(ConfigError::UnsupportedBackend("credman")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StorageKey;
    use tempfile::tempdir;

    #[tokio::test]
    async fn opens_sqlite_in_data_dir() {
        let temp_dir = tempdir().unwrap();
        let config = AppConfig {
            data_dir: temp_dir.path().join("nested"),
            ..AppConfig::default()
        };

        let storage = open_storage(&config).unwrap();
        storage
            .set_item(&StorageKey::default(), "{}")
            .await
            .unwrap();
        assert!(temp_dir.path().join("nested").join("campsite.db").exists());
    }

    #[tokio::test]
    async fn opens_memory() {
        let config = AppConfig {
            storage: StorageBackend::Memory,
            ..AppConfig::default()
        };
        let storage = open_storage(&config).unwrap();
        assert!(storage.get_item(&StorageKey::default()).await.unwrap().is_none());
    }

    #[cfg(not(windows))]
    #[test]
    fn credman_unsupported_off_windows() {
        let config = AppConfig {
            storage: StorageBackend::CredMan,
            ..AppConfig::default()
        };
        assert!(matches!(
            open_storage(&config),
            Err(ConfigError::UnsupportedBackend("credman"))
        ));
    }
}
