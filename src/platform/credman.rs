//! Windows Credential Manager storage facility
//!
//! This module contains all unsafe Windows API code for credential storage.
//! Each key becomes a generic credential named `Campsite:<key>` whose blob is
//! the stored value, encrypted at rest by DPAPI.

use crate::constants::CREDMAN_TARGET_PREFIX;
use crate::core::SecureStorage;
use crate::models::StorageKey;
use crate::utils::StorageError;
use async_trait::async_trait;
use std::ffi::OsStr;
use std::os::windows::ffi::OsStrExt;
use windows::core::{PCWSTR, PWSTR};
use windows::Win32::Foundation::FILETIME;
use windows::Win32::Security::Credentials::{
    CredDeleteW, CredFree, CredReadW, CredWriteW, CREDENTIALW, CRED_FLAGS,
    CRED_PERSIST_LOCAL_MACHINE, CRED_TYPE_GENERIC,
};

/// HRESULT for ERROR_NOT_FOUND
const HRESULT_NOT_FOUND: i32 = 0x80070490u32 as i32;

/// Storage backed by CredRead/CredWrite/CredDelete
///
/// # Security
/// - Values encrypted at rest using DPAPI
/// - Keys tied to the user account
pub struct WindowsCredentialStorage;

impl WindowsCredentialStorage {
    pub fn new() -> Self {
        WindowsCredentialStorage
    }
}

impl Default for WindowsCredentialStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn wide(value: &str) -> Vec<u16> {
    // trailing 0 is the null terminator Windows expects
    OsStr::new(value)
        .encode_wide()
        .chain(std::iter::once(0))
        .collect()
}

fn target_name(key: &StorageKey) -> Vec<u16> {
    wide(&format!("{}{}", CREDMAN_TARGET_PREFIX, key.as_str()))
}

#[async_trait]
impl SecureStorage for WindowsCredentialStorage {
    async fn get_item(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        // Windows APIs are synchronous
        self.read_sync(key)
    }

    async fn set_item(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        self.write_sync(key, value)
    }

    async fn delete_item(&self, key: &StorageKey) -> Result<(), StorageError> {
        self.delete_sync(key)
    }
}

impl WindowsCredentialStorage {
    fn write_sync(&self, key: &StorageKey, value: &str) -> Result<(), StorageError> {
        let target = target_name(key);
        // blob is stored without a terminator so values ending in NUL survive
        let blob: Vec<u16> = OsStr::new(value).encode_wide().collect();
        let user = wide(key.as_str());

        // SAFETY: All pointers are valid for the duration of the CredWriteW call
        unsafe {
            let cred = CREDENTIALW {
                Flags: CRED_FLAGS(0),
                Type: CRED_TYPE_GENERIC,
                TargetName: PWSTR(target.as_ptr() as *mut u16),
                Comment: PWSTR::null(),
                LastWritten: FILETIME::default(),
                // Size in BYTES (UTF-16 chars are 2 bytes each)
                CredentialBlobSize: (blob.len() * 2) as u32,
                CredentialBlob: blob.as_ptr() as *mut u8,
                Persist: CRED_PERSIST_LOCAL_MACHINE,
                AttributeCount: 0,
                Attributes: std::ptr::null_mut(),
                TargetAlias: PWSTR::null(),
                UserName: PWSTR(user.as_ptr() as *mut u16),
            };

            CredWriteW(&cred, 0).map_err(|e| {
                StorageError::Unavailable(format!("Failed to write '{}': {:?}", key, e))
            })?;
        }

        Ok(())
    }

    fn read_sync(&self, key: &StorageKey) -> Result<Option<String>, StorageError> {
        let target = target_name(key);
        let mut pcred = std::ptr::null_mut();

        unsafe {
            if let Err(e) = CredReadW(
                PCWSTR::from_raw(target.as_ptr()),
                CRED_TYPE_GENERIC,
                0,
                &mut pcred,
            ) {
                if e.code().0 == HRESULT_NOT_FOUND {
                    return Ok(None);
                }
                return Err(StorageError::Unavailable(format!(
                    "Failed to read '{}': {:?}",
                    key, e
                )));
            }

            // SAFETY: pcred is valid after successful CredReadW
            let cred = &*(pcred as *const CREDENTIALW);
            let bytes: &[u8] = if cred.CredentialBlob.is_null() {
                &[]
            } else {
                std::slice::from_raw_parts(cred.CredentialBlob, cred.CredentialBlobSize as usize)
            };
            let units: Vec<u16> = bytes
                .chunks_exact(2)
                .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
                .collect();
            let decoded = String::from_utf16(&units);

            // CRITICAL: Free the credential allocated by Windows
            CredFree(pcred as *const _);

            decoded
                .map(Some)
                .map_err(|e| {
                    StorageError::Unavailable(format!("Failed to decode '{}': {:?}", key, e))
                })
        }
    }

    fn delete_sync(&self, key: &StorageKey) -> Result<(), StorageError> {
        let target = target_name(key);

        // CredDeleteW fails when nothing is stored; that counts as success
        unsafe {
            match CredDeleteW(PCWSTR::from_raw(target.as_ptr()), CRED_TYPE_GENERIC, 0) {
                Ok(_) => Ok(()),
                Err(e) if e.code().0 == HRESULT_NOT_FOUND => Ok(()),
                Err(e) => Err(StorageError::Unavailable(format!(
                    "Failed to delete '{}': {:?}",
                    key, e
                ))),
            }
        }
    }
}
