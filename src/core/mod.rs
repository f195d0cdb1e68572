//! Core business logic (platform-agnostic)
//!
//! CRITICAL: This module MUST NOT import platform-specific code or UI frameworks.

pub mod credential;
pub mod device;
pub mod login;
pub mod registration;
pub mod storage;

pub use credential::{CredentialStore, PersistOp, PersistOutcome};
pub use device::{
    DeviceServices, ImageFormat, ImageManipulator, ImageOutcome, ImagePicker, ImageSource,
    ManipulateOptions, MediaLibrary, PermissionStatus, PickedImage, PickerOptions,
};
pub use login::{LoginTab, MountOutcome, TabState};
pub use registration::RegisterTab;
pub use storage::SecureStorage;
