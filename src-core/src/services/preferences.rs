//! Preferences service
//!
//! Loads user preferences once at startup and writes every change through
//! to the key-value store. Observers subscribe to a watch channel instead
//! of binding to fields.

use crate::error::Result;
use crate::models::{AutoChangeInterval, NotificationInterval, Preferences, QuoteCategory};
use crate::storage::KeyValueStore;
use std::collections::BTreeSet;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};

/// Service for reading and updating preferences
#[derive(Clone)]
pub struct PreferencesService {
    store: Arc<dyn KeyValueStore>,
    tx: Arc<watch::Sender<Preferences>>,
    write_lock: Arc<Mutex<()>>,
}

impl PreferencesService {
    /// Load preferences from the store, applying defaults for absent keys
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let preferences = Preferences::load_from(store.as_ref()).await;
        tracing::info!(
            "Preferences loaded (auto change: {}, notifications: {}, online: {})",
            preferences.auto_change_quote,
            preferences.show_notifications,
            preferences.use_online_quotes
        );

        let (tx, _rx) = watch::channel(preferences);
        Self {
            store,
            tx: Arc::new(tx),
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Snapshot of the current preferences
    pub fn get(&self) -> Preferences {
        self.tx.borrow().clone()
    }

    /// Receive every future change
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }

    /// Apply `change` and persist the result.
    ///
    /// Updates are serialized by a write lock held across the store write.
    /// The in-memory value changes even when the write fails; the error is
    /// returned so the caller can report it.
    pub async fn update<F>(&self, change: F) -> Result<Preferences>
    where
        F: FnOnce(&mut Preferences) + Send,
    {
        let _guard = self.write_lock.lock().await;

        let mut next = self.get();
        change(&mut next);
        let unchanged = next == *self.tx.borrow();
        if unchanged {
            return Ok(next);
        }

        let outcome = next.persist_to(self.store.as_ref()).await;
        self.tx.send_replace(next.clone());

        match outcome {
            Ok(()) => {
                tracing::debug!("Preferences updated");
                Ok(next)
            }
            Err(e) => {
                tracing::error!("Failed to persist preferences: {}", e);
                Err(e)
            }
        }
    }

    /// Replace all preferences at once
    pub async fn replace(&self, preferences: Preferences) -> Result<Preferences> {
        self.update(|current| *current = preferences).await
    }

    /// Restore defaults and persist them
    pub async fn reset(&self) -> Result<Preferences> {
        tracing::info!("Resetting preferences to defaults");
        self.replace(Preferences::default()).await
    }

    pub async fn set_auto_change(&self, enabled: bool, interval: AutoChangeInterval) -> Result<Preferences> {
        self.update(|p| {
            p.auto_change_quote = enabled;
            p.auto_change_interval = interval;
        })
        .await
    }

    pub async fn set_notifications(
        &self,
        enabled: bool,
        interval: NotificationInterval,
    ) -> Result<Preferences> {
        self.update(|p| {
            p.show_notifications = enabled;
            p.notification_interval = interval;
        })
        .await
    }

    pub async fn set_preferred_categories(
        &self,
        categories: BTreeSet<QuoteCategory>,
    ) -> Result<Preferences> {
        self.update(|p| p.preferred_categories = categories).await
    }

    /// Flip one category in or out of the preferred set
    pub async fn toggle_category(&self, category: QuoteCategory) -> Result<Preferences> {
        self.update(|p| {
            if !p.preferred_categories.remove(&category) {
                p.preferred_categories.insert(category);
            }
        })
        .await
    }

    pub async fn set_use_online_quotes(&self, enabled: bool) -> Result<Preferences> {
        self.update(|p| p.use_online_quotes = enabled).await
    }

    pub async fn set_sound_enabled(&self, enabled: bool) -> Result<Preferences> {
        self.update(|p| p.sound_enabled = enabled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::{FileStore, MemoryStore, StoreFuture};
    use tempfile::TempDir;

    async fn create_test_service() -> (PreferencesService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let service = PreferencesService::load(store.clone()).await;
        (service, store)
    }

    /// Store whose writes always fail
    struct ReadOnlyStore;

    impl KeyValueStore for ReadOnlyStore {
        fn read<'a>(&'a self, _key: &'a str) -> StoreFuture<'a, Option<String>> {
            Box::pin(async { Ok(None) })
        }

        fn write<'a>(&'a self, key: &'a str, _value: &'a str) -> StoreFuture<'a, ()> {
            Box::pin(async move { Err(AppError::Storage(format!("{} is read-only", key))) })
        }

        fn remove<'a>(&'a self, _key: &'a str) -> StoreFuture<'a, ()> {
            Box::pin(async { Ok(()) })
        }
    }

    #[tokio::test]
    async fn test_defaults_when_store_is_empty() {
        let (service, _store) = create_test_service().await;
        assert_eq!(service.get(), Preferences::default());
    }

    #[tokio::test]
    async fn test_update_writes_through() {
        let (service, store) = create_test_service().await;

        service.set_sound_enabled(true).await.unwrap();

        assert_eq!(store.read("soundEnabled").await.unwrap().as_deref(), Some("true"));
        assert!(service.get().sound_enabled);
    }

    #[tokio::test]
    async fn test_unchanged_update_is_not_published() {
        let (service, store) = create_test_service().await;
        let mut rx = service.subscribe();

        service.set_sound_enabled(false).await.unwrap();
        assert!(!rx.has_changed().unwrap());
        assert!(!store.contains("soundEnabled"));

        service.set_sound_enabled(true).await.unwrap();
        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().sound_enabled);
    }

    #[tokio::test]
    async fn test_failed_write_still_updates_memory() {
        let service = PreferencesService::load(Arc::new(ReadOnlyStore)).await;
        let mut rx = service.subscribe();

        let result = service.set_use_online_quotes(true).await;

        assert!(matches!(result, Err(AppError::Storage(_))));
        assert!(service.get().use_online_quotes);
        assert!(rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_updates_are_not_lost() {
        let (service, _store) = create_test_service().await;

        let a = {
            let service = service.clone();
            tokio::spawn(async move { service.set_sound_enabled(true).await })
        };
        let b = {
            let service = service.clone();
            tokio::spawn(async move { service.set_use_online_quotes(true).await })
        };
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        let prefs = service.get();
        assert!(prefs.sound_enabled);
        assert!(prefs.use_online_quotes);
    }

    #[tokio::test]
    async fn test_toggle_category() {
        let (service, _store) = create_test_service().await;

        let prefs = service.toggle_category(QuoteCategory::Courage).await.unwrap();
        assert!(!prefs.preferred_categories.contains(&QuoteCategory::Courage));

        let prefs = service.toggle_category(QuoteCategory::Courage).await.unwrap();
        assert!(prefs.preferred_categories.contains(&QuoteCategory::Courage));
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let (service, _store) = create_test_service().await;
        service
            .set_auto_change(true, AutoChangeInterval::Daily)
            .await
            .unwrap();

        let prefs = service.reset().await.unwrap();
        assert_eq!(prefs, Preferences::default());
    }

    #[tokio::test]
    async fn test_preferences_persist_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(temp_dir.path().to_path_buf()));

        // Create service, update preferences, drop it
        {
            let service = PreferencesService::load(store.clone()).await;
            service
                .set_notifications(true, NotificationInterval::Weekly)
                .await
                .unwrap();
            service
                .set_preferred_categories([QuoteCategory::Growth].into_iter().collect())
                .await
                .unwrap();
        }

        // Create new service, verify preferences were persisted
        {
            let service = PreferencesService::load(store).await;
            let prefs = service.get();
            assert!(prefs.show_notifications);
            assert_eq!(prefs.notification_interval, NotificationInterval::Weekly);
            assert_eq!(prefs.preferred_categories.len(), 1);
            assert!(prefs.preferred_categories.contains(&QuoteCategory::Growth));
        }
    }
}
