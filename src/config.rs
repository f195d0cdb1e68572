//! Runtime configuration read from the environment.

use crate::constants::{
    APP_DIR_NAME, DEFAULT_BASE_URL, ENV_BASE_URL, ENV_DATA_DIR, ENV_PLATFORM, ENV_STORAGE,
    PLACEHOLDER_IMAGE_PATH,
};
use crate::utils::ConfigError;
use std::path::PathBuf;
use std::str::FromStr;

/// Which storage facility backs the credential store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// SQLite `kv` table in the data directory
    #[default]
    Sqlite,
    /// In-process map; nothing survives a restart
    Memory,
    /// Windows Credential Manager (DPAPI-encrypted)
    CredMan,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            "credman" => Ok(StorageBackend::CredMan),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

/// Host platform, only consulted for date picker dismissal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Platform {
    Ios,
    #[default]
    Android,
}

impl FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "android" => Ok(Platform::Android),
            other => Err(ConfigError::UnknownPlatform(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub storage: StorageBackend,
    pub base_url: String,
    pub platform: Platform,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            storage: StorageBackend::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            platform: Platform::default(),
        }
    }
}

impl AppConfig {
    /// Build a config from `CAMPSITE_*` variables, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`AppConfig::from_env`] with an injectable variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig {
            data_dir: default_data_dir_from(&lookup),
            storage: StorageBackend::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            platform: Platform::default(),
        };

        if let Some(dir) = non_empty(lookup(ENV_DATA_DIR)) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(backend) = lookup(ENV_STORAGE) {
            config.storage = backend.parse()?;
        }
        if let Some(url) = non_empty(lookup(ENV_BASE_URL)) {
            config.base_url = normalize_base_url(&url);
        }
        if let Some(platform) = lookup(ENV_PLATFORM) {
            config.platform = platform.parse()?;
        }

        Ok(config)
    }

    /// URL of the avatar shown before the user picks an image.
    pub fn placeholder_image_url(&self) -> String {
        format!("{}{}", self.base_url, PLACEHOLDER_IMAGE_PATH)
    }
}

fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `%APPDATA%\Campsite`, else `$HOME/.campsite`, else `./.campsite`.
pub fn default_data_dir() -> PathBuf {
    default_data_dir_from(&|name: &str| std::env::var(name).ok())
}

fn default_data_dir_from<F>(lookup: &F) -> PathBuf
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(app_data) = non_empty(lookup("APPDATA")) {
        return PathBuf::from(app_data).join(APP_DIR_NAME);
    }
    if let Some(home) = non_empty(lookup("HOME")) {
        return PathBuf::from(home).join(".campsite");
    }
    PathBuf::from(".campsite")
}
