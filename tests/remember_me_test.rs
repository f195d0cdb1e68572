//! End-to-end remember-me flow against the durable SQLite facility.

use campsite::{
    AppConfig, CredentialStore, Credentials, LoginTab, MountOutcome, PersistOutcome,
    SecureString, StorageBackend,
};
use std::sync::Arc;
use tempfile::tempdir;

fn sqlite_config(dir: &std::path::Path) -> AppConfig {
    AppConfig {
        data_dir: dir.to_path_buf(),
        storage: StorageBackend::Sqlite,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn remember_then_forget_across_restarts() {
    let temp_dir = tempdir().expect("temp dir created");
    let config = sqlite_config(temp_dir.path());

    // first launch: empty store, user logs in with remember checked
    {
        let store = CredentialStore::new(campsite::open_storage(&config).unwrap());
        let tab = LoginTab::new(store.clone());
        assert_eq!(tab.mount().await.unwrap(), MountOutcome::Empty);

        tab.set_username("alice");
        tab.set_password("p1");
        tab.set_remember(true);
        assert_eq!(tab.submit().await.unwrap(), PersistOutcome::Saved);
        assert_eq!(
            store.load().await,
            Some(Credentials::new("alice", SecureString::new("p1")))
        );
    }

    // second launch: form is pre-filled, user logs in as someone else without remember
    {
        let store = CredentialStore::new(campsite::open_storage(&config).unwrap());
        let tab = LoginTab::new(store.clone());
        assert_eq!(tab.mount().await.unwrap(), MountOutcome::Prefilled);

        let form = tab.form();
        assert_eq!(form.username, "alice");
        assert_eq!(form.password.as_str(), "p1");
        assert!(form.remember);

        tab.set_username("bob");
        tab.set_password("p2");
        tab.set_remember(false);
        assert_eq!(tab.submit().await.unwrap(), PersistOutcome::Cleared);
        assert!(store.load().await.is_none());
    }

    // third launch: nothing remembered
    let store = CredentialStore::new(campsite::open_storage(&config).unwrap());
    let tab = LoginTab::new(store);
    assert_eq!(tab.mount().await.unwrap(), MountOutcome::Empty);
    assert!(!tab.form().remember);
}

#[tokio::test]
async fn remember_false_clears_regardless_of_prior_state() {
    let store = CredentialStore::new(Arc::new(campsite::MemoryStorage::new()));

    for prior in [None, Some(("carol", "old"))] {
        if let Some((user, pass)) = prior {
            store
                .save(&Credentials::new(user, SecureString::new(pass)))
                .await;
        }

        let tab = LoginTab::new(store.clone());
        tab.set_username("dave");
        tab.set_password("new");
        tab.submit().await.unwrap();

        assert!(store.load().await.is_none());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn rapid_submits_settle_on_the_last_choice() {
    let temp_dir = tempdir().expect("temp dir created");
    let config = sqlite_config(temp_dir.path());
    let store = CredentialStore::new(campsite::open_storage(&config).unwrap());
    let tab = LoginTab::new(store.clone());
    tab.mount().await.unwrap();

    tab.set_username("alice");
    tab.set_password("p1");
    for _ in 0..10 {
        tab.set_remember(true);
        drop(tab.submit());
        tab.set_remember(false);
        drop(tab.submit());
    }
    tab.set_remember(true);
    drop(tab.submit());
    tab.set_remember(false);
    assert_eq!(tab.submit().await.unwrap(), PersistOutcome::Cleared);

    let reopened = CredentialStore::new(campsite::open_storage(&config).unwrap());
    assert!(reopened.load().await.is_none());
}
