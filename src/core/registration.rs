//! Registration tab controller
//!
//! Shares the remembered-credential key and policy with the login tab and
//! adds the profile image flow.

use crate::core::credential::{CredentialStore, PersistOutcome};
use crate::core::device::{DeviceServices, ImageOutcome, ImageSource, PickError};
use crate::logger;
use crate::models::RegistrationForm;
use crate::utils::sync::lock;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;

pub struct RegisterTab {
    store: CredentialStore,
    devices: DeviceServices,
    form: Arc<Mutex<RegistrationForm>>,
}

impl RegisterTab {
    pub fn new(
        store: CredentialStore,
        devices: DeviceServices,
        placeholder_image_url: impl Into<String>,
    ) -> Self {
        Self {
            store,
            devices,
            form: Arc::new(Mutex::new(RegistrationForm::new(placeholder_image_url))),
        }
    }

    pub fn form(&self) -> RegistrationForm {
        lock(&self.form, "register_form").clone()
    }

    /// Apply an edit to the form fields
    pub fn edit<F>(&self, f: F)
    where
        F: FnOnce(&mut RegistrationForm),
    {
        f(&mut *lock(&self.form, "register_form"));
    }

    /// Handle the register button; same remember policy as login.
    pub fn submit(&self) -> JoinHandle<PersistOutcome> {
        let (creds, remember, summary) = {
            let form = lock(&self.form, "register_form");
            (form.credentials(), form.remember, form.summary_json())
        };

        match summary {
            Ok(json) => logger::log_info(&format!("register: {}", json)),
            Err(e) => logger::log_warn(&format!("register: could not summarize form: {}", e)),
        }

        self.store.submit(creds, remember)
    }

    pub async fn image_from_camera(&self) -> ImageOutcome {
        self.update_image(ImageSource::Camera).await
    }

    pub async fn image_from_gallery(&self) -> ImageOutcome {
        self.update_image(ImageSource::Gallery).await
    }

    /// Pick, resize, show, then copy to the media library.
    async fn update_image(&self, source: ImageSource) -> ImageOutcome {
        let uri = match self.devices.pick_and_process(source).await {
            Ok(Some(uri)) => uri,
            Ok(None) => return ImageOutcome::Cancelled,
            Err(PickError::PermissionDenied) => return ImageOutcome::PermissionDenied,
            Err(PickError::Device(e)) => {
                logger::log_error(&format!("{:?} image failed: {}", source, e));
                return ImageOutcome::Failed(e);
            }
        };

        lock(&self.form, "register_form").image_url = uri.clone();
        let saved_to_library = self.devices.save_to_library(&uri).await;

        ImageOutcome::Updated {
            uri,
            saved_to_library,
        }
    }
}
