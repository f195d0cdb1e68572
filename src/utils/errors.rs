//! Error types for Campsite
//!
//! All error types use thiserror for clean error handling.
//! SECURITY: Error messages MUST NOT contain passwords or sensitive data.

/// Errors from the secure storage facility
///
/// There is a single kind: the facility rejected a read, write or delete.
/// Callers on the credential path reduce it to a log line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors from opening or migrating the SQLite backend
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<DbError> for StorageError {
    fn from(err: DbError) -> Self {
        StorageError::Unavailable(err.to_string())
    }
}

/// Errors from environment configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown storage backend '{0}' (expected sqlite, memory or credman)")]
    UnknownBackend(String),

    #[error("Unknown platform '{0}' (expected ios or android)")]
    UnknownPlatform(String),

    #[error("Storage backend '{0}' is not supported on this platform")]
    UnsupportedBackend(&'static str),

    #[error("Failed to open storage: {0}")]
    Storage(#[from] DbError),
}

/// Errors from rejected form input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Number of campers must be between {min} and {max}, got {value}")]
    CampersOutOfRange { value: u8, min: u8, max: u8 },
}

/// Errors from camera, gallery and media library collaborators
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    #[error("Image picker failed: {0}")]
    Picker(String),

    #[error("Image manipulation failed: {0}")]
    Manipulation(String),

    #[error("Media library error: {0}")]
    MediaLibrary(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn db_error_maps_to_unavailable() {
        let err: StorageError = DbError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ))
        .into();
        match err {
            StorageError::Unavailable(msg) => assert!(msg.contains("denied")),
        }
    }

    #[test]
    fn campers_error_message() {
        let err = FormError::CampersOutOfRange {
            value: 9,
            min: 1,
            max: 6,
        };
        assert_eq!(
            err.to_string(),
            "Number of campers must be between 1 and 6, got 9"
        );
    }
}
