//! Campsite - login, registration and reservation form logic
//!
//! Core library exposing the remembered-credential store, the tab
//! controllers that drive it, and the storage facilities behind it.

// Public modules
pub mod config;
pub mod constants;
pub mod core;
pub mod logger;
pub mod models;
pub mod platform;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{
    CredentialStore, LoginTab, MountOutcome, PersistOp, PersistOutcome, RegisterTab,
    SecureStorage, TabState,
};
pub use config::{AppConfig, Platform, StorageBackend};
pub use models::{
    Credentials, LoginForm, RegistrationForm, Reservation, ReservationForm, SecureString,
    StorageKey,
};
pub use platform::{open_storage, MemoryStorage, SqliteStorage};
pub use utils::{ConfigError, DbError, DeviceError, FormError, StorageError};
