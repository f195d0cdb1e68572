//! Credential types for the remember-me flow
//!
//! SECURITY: Credential types implement Drop to clear sensitive data.

use crate::constants::USERINFO_KEY;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Password that zeros memory on drop
///
/// SECURITY: This type never implements Display or Debug in a way that reveals the password.
pub struct SecureString(String);

impl Clone for SecureString {
    fn clone(&self) -> Self {
        SecureString(self.0.clone())
    }
}

impl PartialEq for SecureString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecureString {}

impl SecureString {
    pub fn new(password: impl Into<String>) -> Self {
        SecureString(password.into())
    }

    /// Get the password as a string slice
    ///
    /// Use this sparingly and only when necessary for storage calls.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for SecureString {
    fn default() -> Self {
        SecureString(String::new())
    }
}

impl Drop for SecureString {
    fn drop(&mut self) {
        // SAFETY: We own this String and are zeroing it before drop
        unsafe {
            let bytes = self.0.as_bytes_mut();
            for byte in bytes {
                std::ptr::write_volatile(byte, 0);
            }
        }
    }
}

impl fmt::Debug for SecureString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SECURITY: Never reveal the password content
        write!(f, "SecureString(*** {} bytes ***)", self.0.len())
    }
}

/// Username/password pair persisted when "remember me" is checked
///
/// The username carries no format constraint; whatever the user typed is kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: SecureString,
}

/// Serialized form: `{"username": ..., "password": ...}`
#[derive(Serialize)]
struct UserInfoRef<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct UserInfo {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: SecureString) -> Self {
        Credentials {
            username: username.into(),
            password,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &SecureString {
        &self.password
    }

    /// Encode as the JSON object stored under the credential key.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&UserInfoRef {
            username: &self.username,
            password: self.password.as_str(),
        })
    }

    /// Decode a stored value.
    ///
    /// Anything that is not a `{username, password}` object (including the
    /// literal `null`) yields `None`; corrupt data is treated as absence.
    pub fn from_json(raw: &str) -> Option<Self> {
        match serde_json::from_str::<Option<UserInfo>>(raw) {
            Ok(Some(info)) => Some(Credentials::new(
                info.username,
                SecureString::new(info.password),
            )),
            Ok(None) | Err(_) => None,
        }
    }
}

/// Key a value is stored under in the secure storage facility
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn new(name: impl Into<String>) -> Self {
        StorageKey(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    /// The single fixed credential key, `"userinfo"`
    fn default() -> Self {
        StorageKey(USERINFO_KEY.to_string())
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secure_string_debug_no_leak() {
        let password = SecureString::new("secret123");
        let debug_output = format!("{:?}", password);
        assert!(!debug_output.contains("secret"));
        assert!(debug_output.contains("9 bytes"));
    }

    #[test]
    fn test_credentials_debug_no_leak() {
        let creds = Credentials::new("alice", SecureString::new("hunter2"));
        let debug_output = format!("{:?}", creds);
        assert!(debug_output.contains("alice"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_json_shape() {
        let creds = Credentials::new("alice", SecureString::new("p1"));
        let json = creds.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"username": "alice", "password": "p1"})
        );
    }

    #[test]
    fn test_from_json_accepts_stored_object() {
        let creds = Credentials::from_json(r#"{"username":"bob","password":"p2"}"#).unwrap();
        assert_eq!(creds.username(), "bob");
        assert_eq!(creds.password().as_str(), "p2");
    }

    #[test]
    fn test_from_json_ignores_extra_fields() {
        let creds =
            Credentials::from_json(r#"{"username":"bob","password":"p2","remember":true}"#);
        assert!(creds.is_some());
    }

    #[test]
    fn test_from_json_corrupt_is_absent() {
        assert!(Credentials::from_json("null").is_none());
        assert!(Credentials::from_json("").is_none());
        assert!(Credentials::from_json("{not json").is_none());
        assert!(Credentials::from_json(r#"{"username":"bob"}"#).is_none());
        assert!(Credentials::from_json("42").is_none());
    }

    #[test]
    fn test_empty_fields_are_kept() {
        let creds = Credentials::new("", SecureString::default());
        let back = Credentials::from_json(&creds.to_json().unwrap()).unwrap();
        assert_eq!(back, creds);
    }

    #[test]
    fn test_default_key() {
        assert_eq!(StorageKey::default().as_str(), "userinfo");
    }
}
