//! Mutex helpers

use crate::logger;
use std::sync::{Mutex, MutexGuard};

/// Lock `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|p| {
        logger::log_warn(&format!(
            "Recovered from poisoned mutex '{}' - previous thread panicked",
            name
        ));
        p.into_inner()
    })
}
