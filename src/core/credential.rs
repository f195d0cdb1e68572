//! Remembered credential persistence
//!
//! At most one credential is stored, under the fixed `"userinfo"` key. Every
//! write is best-effort: failures are logged and reported through
//! [`PersistOutcome`], never returned as errors, so a broken storage facility
//! cannot block login or registration.

use crate::core::storage::SecureStorage;
use crate::logger;
use crate::models::{Credentials, StorageKey};
use crate::utils::sync::lock;
use crate::utils::StorageError;
use std::fmt;
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Which write a submission issued
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistOp {
    Save,
    Clear,
}

impl fmt::Display for PersistOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistOp::Save => write!(f, "save"),
            PersistOp::Clear => write!(f, "delete"),
        }
    }
}

/// Result of a best-effort write
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    Saved,
    Cleared,
    Failed { op: PersistOp, error: StorageError },
}

impl PersistOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, PersistOutcome::Failed { .. })
    }
}

/// Completion signal of the most recently queued write
type WriteTail = Mutex<Option<oneshot::Receiver<()>>>;

/// Credential store over an injected storage facility
///
/// Clones share one write queue, so submissions from every tab built on the
/// same store reach the facility in the order they were made.
#[derive(Clone)]
pub struct CredentialStore {
    storage: Arc<dyn SecureStorage>,
    key: StorageKey,
    tail: Arc<WriteTail>,
}

impl CredentialStore {
    /// Store using the default `"userinfo"` key
    pub fn new(storage: Arc<dyn SecureStorage>) -> Self {
        Self::with_key(storage, StorageKey::default())
    }

    pub fn with_key(storage: Arc<dyn SecureStorage>, key: StorageKey) -> Self {
        Self {
            storage,
            key,
            tail: Arc::new(Mutex::new(None)),
        }
    }

    pub fn key(&self) -> &StorageKey {
        &self.key
    }

    /// Persist `creds`, overwriting any previous value.
    pub async fn save(&self, creds: &Credentials) -> PersistOutcome {
        let result = match creds.to_json() {
            Ok(json) => self.storage.set_item(&self.key, &json).await,
            Err(e) => Err(StorageError::Unavailable(format!(
                "Failed to serialize user info: {}",
                e
            ))),
        };

        match result {
            Ok(()) => {
                logger::log_debug(&format!("Saved user info for '{}'", creds.username()));
                PersistOutcome::Saved
            }
            Err(error) => {
                logger::log_warn(&format!("Could not save user info: {}", error));
                PersistOutcome::Failed {
                    op: PersistOp::Save,
                    error,
                }
            }
        }
    }

    /// Remove any persisted credential.
    pub async fn clear(&self) -> PersistOutcome {
        match self.storage.delete_item(&self.key).await {
            Ok(()) => {
                logger::log_debug("Deleted user info");
                PersistOutcome::Cleared
            }
            Err(error) => {
                logger::log_warn(&format!("Could not delete user info: {}", error));
                PersistOutcome::Failed {
                    op: PersistOp::Clear,
                    error,
                }
            }
        }
    }

    /// Read the persisted credential.
    ///
    /// A read failure or a value that does not decode is reported as absent.
    pub async fn load(&self) -> Option<Credentials> {
        let raw = match self.storage.get_item(&self.key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                logger::log_warn(&format!("Could not read user info: {}", e));
                return None;
            }
        };

        let creds = Credentials::from_json(&raw);
        if creds.is_none() {
            logger::log_warn("Stored user info is malformed; treating as absent");
        }
        creds
    }

    /// Submission policy: save when `remember` is set, clear otherwise.
    ///
    /// Exactly one write is issued per call.
    pub async fn apply_remember(&self, creds: &Credentials, remember: bool) -> PersistOutcome {
        if remember {
            self.save(creds).await
        } else {
            self.clear().await
        }
    }

    /// Queue [`CredentialStore::apply_remember`] behind every earlier submission.
    ///
    /// The position in the queue is taken before this returns; the write itself
    /// runs in the background. Dropping the handle does not cancel it.
    /// Must be called from inside a tokio runtime.
    pub fn submit(&self, creds: Credentials, remember: bool) -> JoinHandle<PersistOutcome> {
        let (done_tx, done_rx) = oneshot::channel();
        let previous = lock(&self.tail, "write_tail").replace(done_rx);

        let store = self.clone();
        tokio::spawn(async move {
            if let Some(previous) = previous {
                // Err means the earlier write task is gone; either way it is finished
                let _ = previous.await;
            }
            let outcome = store.apply_remember(&creds, remember).await;
            let _ = done_tx.send(());
            outcome
        })
    }
}
