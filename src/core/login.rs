//! Login tab controller
//!
//! Owns the login form state and drives the remembered-credential lifecycle:
//! one read when the tab mounts, one write per submission.
//!
//! All methods that spawn work must be called from inside a tokio runtime.

use crate::core::credential::{CredentialStore, PersistOutcome};
use crate::logger;
use crate::models::{Credentials, LoginForm, SecureString};
use crate::utils::sync::lock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};
use tokio::task::JoinHandle;

/// Lifecycle of the remembered credential for one tab instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabState {
    Uninitialized,
    /// `remembered` is true when a credential was found and pre-filled
    Loaded { remembered: bool },
}

/// How the mount-time read ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountOutcome {
    Prefilled,
    Empty,
    /// The tab was dropped before the read resolved; nothing was updated
    Discarded,
    /// `mount` was already called on this tab; no read was issued
    AlreadyMounted,
}

/// Spawn the one-time credential read.
///
/// `apply` runs only if both `form` and `state` are still alive when the read
/// resolves.
fn spawn_prefill<F, A>(
    store: CredentialStore,
    form: Weak<Mutex<F>>,
    state: Weak<Mutex<TabState>>,
    apply: A,
) -> JoinHandle<MountOutcome>
where
    F: Send + 'static,
    A: FnOnce(&mut F, &Credentials) + Send + 'static,
{
    tokio::spawn(async move {
        let loaded = store.load().await;

        let (Some(form), Some(state)) = (form.upgrade(), state.upgrade()) else {
            logger::log_debug("Tab unmounted before user info loaded; discarding");
            return MountOutcome::Discarded;
        };

        let remembered = loaded.is_some();
        if let Some(creds) = loaded {
            apply(&mut *lock(&form, "tab_form"), &creds);
        }
        *lock(&state, "tab_state") = TabState::Loaded { remembered };

        if remembered {
            MountOutcome::Prefilled
        } else {
            MountOutcome::Empty
        }
    })
}

pub struct LoginTab {
    store: CredentialStore,
    form: Arc<Mutex<LoginForm>>,
    state: Arc<Mutex<TabState>>,
    mounted: AtomicBool,
}

impl LoginTab {
    pub fn new(store: CredentialStore) -> Self {
        Self {
            store,
            form: Arc::new(Mutex::new(LoginForm::default())),
            state: Arc::new(Mutex::new(TabState::Uninitialized)),
            mounted: AtomicBool::new(false),
        }
    }

    /// Start the one-time read that pre-fills the form.
    ///
    /// The form stays interactive while the read is pending. If this tab is
    /// dropped first, the result is discarded.
    pub fn mount(&self) -> JoinHandle<MountOutcome> {
        if self.mounted.swap(true, Ordering::SeqCst) {
            return tokio::spawn(async { MountOutcome::AlreadyMounted });
        }

        spawn_prefill(
            self.store.clone(),
            Arc::downgrade(&self.form),
            Arc::downgrade(&self.state),
            |form: &mut LoginForm, creds| form.prefill(creds),
        )
    }

    pub fn state(&self) -> TabState {
        *lock(&self.state, "tab_state")
    }

    /// Snapshot of the current field values
    pub fn form(&self) -> LoginForm {
        lock(&self.form, "tab_form").clone()
    }

    pub fn set_username(&self, username: impl Into<String>) {
        lock(&self.form, "tab_form").username = username.into();
    }

    pub fn set_password(&self, password: impl Into<String>) {
        lock(&self.form, "tab_form").password = SecureString::new(password);
    }

    pub fn set_remember(&self, remember: bool) {
        lock(&self.form, "tab_form").remember = remember;
    }

    pub fn toggle_remember(&self) {
        lock(&self.form, "tab_form").toggle_remember();
    }

    /// Handle the login button.
    ///
    /// Saves the credential when "remember me" is checked and deletes it
    /// otherwise. The write runs in the background after any earlier
    /// submission's write; the returned handle may be awaited for the outcome
    /// or dropped.
    pub fn submit(&self) -> JoinHandle<PersistOutcome> {
        let (creds, remember) = {
            let form = lock(&self.form, "tab_form");
            (form.credentials(), form.remember)
        };

        logger::log_info(&format!(
            "login: username={} remember={}",
            creds.username(),
            remember
        ));

        self.store.submit(creds, remember)
    }
}
