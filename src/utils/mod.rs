//! # Utilities Module
//!
//! Cross-cutting concerns shared by the core and platform modules.
//!
//! ## Modules
//!
//! - [`errors`]: Typed error hierarchy using `thiserror`
//! - `sync`: poison-recovering mutex lock shared by stores and tabs
//!
//! Error types live here to avoid circular dependencies between `core` and
//! `platform`. Storage failures on the credential path are never surfaced to
//! the user; they are logged and reported through `PersistOutcome`.

pub mod errors;
pub(crate) mod sync;

pub use errors::{ConfigError, DbError, DeviceError, FormError, StorageError};
