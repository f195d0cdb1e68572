//! Local form state for the login and registration tabs.

use super::credentials::{Credentials, SecureString};
use serde::Serialize;

/// Login tab fields
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: SecureString,
    pub remember: bool,
}

impl LoginForm {
    /// The pair that would be persisted on submit.
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    /// Fill the form from a remembered credential; the checkbox follows.
    pub fn prefill(&mut self, creds: &Credentials) {
        self.username = creds.username().to_string();
        self.password = creds.password().clone();
        self.remember = true;
    }

    pub fn toggle_remember(&mut self) {
        self.remember = !self.remember;
    }
}

/// Registration tab fields
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RegistrationForm {
    pub username: String,
    pub password: SecureString,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub remember: bool,
    pub image_url: String,
}

/// Loggable view of a registration; the password is never included.
#[derive(Serialize)]
struct RegistrationSummary<'a> {
    username: &'a str,
    #[serde(rename = "firstName")]
    first_name: &'a str,
    #[serde(rename = "lastName")]
    last_name: &'a str,
    email: &'a str,
    remember: bool,
}

impl RegistrationForm {
    pub fn new(placeholder_image_url: impl Into<String>) -> Self {
        Self {
            username: String::new(),
            password: SecureString::default(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            remember: false,
            image_url: placeholder_image_url.into(),
        }
    }

    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.username.clone(), self.password.clone())
    }

    pub fn toggle_remember(&mut self) {
        self.remember = !self.remember;
    }

    pub fn summary_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&RegistrationSummary {
            username: &self.username,
            first_name: &self.first_name,
            last_name: &self.last_name,
            email: &self.email,
            remember: self.remember,
        })
    }
}
