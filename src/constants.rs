//! # Application-Wide Constants
//!
//! Centralized configuration values and magic numbers used throughout Campsite.
//!
//! ## Usage
//!
//! ```rust
//! use campsite::constants::*;
//!
//! assert_eq!(USERINFO_KEY, "userinfo");
//! ```

// ============================================================================
// Credential Storage
// ============================================================================

/// Fixed key the remembered credential is stored under
///
/// There is exactly one credential record; login and registration share it.
pub const USERINFO_KEY: &str = "userinfo";

/// SQLite database file name inside the data directory
pub const DB_FILE_NAME: &str = "campsite.db";

/// Schema version recorded in the `meta` table
pub const SCHEMA_VERSION: &str = "1";

/// Namespace for the generic credential target on Windows Credential Manager
pub const CREDMAN_TARGET_PREFIX: &str = "Campsite:";

// ============================================================================
// Configuration
// ============================================================================

pub const ENV_DATA_DIR: &str = "CAMPSITE_DATA_DIR";
pub const ENV_STORAGE: &str = "CAMPSITE_STORAGE";
pub const ENV_BASE_URL: &str = "CAMPSITE_BASE_URL";
pub const ENV_PLATFORM: &str = "CAMPSITE_PLATFORM";
pub const ENV_LOG_DIR: &str = "CAMPSITE_LOG_DIR";
pub const ENV_LOG_VERBOSE: &str = "CAMPSITE_LOG_VERBOSE";
pub const ENV_ENABLE_LOGGING: &str = "CAMPSITE_ENABLE_LOGGING";

/// Application directory name under `%APPDATA%`
pub const APP_DIR_NAME: &str = "Campsite";

/// Base URL for remote assets when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/";

/// Placeholder avatar path, relative to the base URL
pub const PLACEHOLDER_IMAGE_PATH: &str = "images/logo.png";

// ============================================================================
// Forms
// ============================================================================

/// Smallest party the reservation picker offers
pub const MIN_CAMPERS: u8 = 1;

/// Largest party the reservation picker offers
pub const MAX_CAMPERS: u8 = 6;

/// Width (px) profile images are resized to; height follows the aspect ratio
pub const PROFILE_IMAGE_WIDTH: u32 = 400;

/// Maximum log file size before rotation
pub const MAX_LOG_BYTES: u64 = 10 * 1024 * 1024;
