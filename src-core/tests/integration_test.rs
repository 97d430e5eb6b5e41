//! Integration tests for WhisperZen
//!
//! These tests verify end-to-end functionality including:
//! - Persistence of preferences, history and favorites across restarts
//! - Preference-filtered selection with fallbacks
//! - Online fetch failure falling back to a local quote
//! - Timer-driven rotation on virtual time

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use whisperzen::app;
use whisperzen::catalog::Catalog;
use whisperzen::models::{AutoChangeInterval, NotificationInterval, Quote, QuoteCategory};
use whisperzen::services::{
    ExportFormat, HttpQuoteSource, IntervalScheduler, LogNotifier, NotificationAction,
    PreferencesService, QuoteEngine, QuoteSource, RotationController, TimerState,
};
use whisperzen::storage::{FileStore, KeyValueStore, MemoryStore};

fn quote(content: &str, category: QuoteCategory) -> Quote {
    Quote::new(content, None, category).unwrap()
}

/// Engine over a custom catalog and an in-memory store
async fn create_test_engine(
    catalog: Catalog,
    remote: Option<Arc<dyn QuoteSource>>,
) -> (QuoteEngine, PreferencesService) {
    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    let preferences = PreferencesService::load(store.clone()).await;
    let engine = QuoteEngine::with_rng(
        Arc::new(catalog),
        preferences.clone(),
        store,
        remote,
        StdRng::seed_from_u64(2024),
    )
    .await
    .unwrap();
    (engine, preferences)
}

#[tokio::test]
async fn test_state_survives_restart() {
    let temp_dir = TempDir::new().unwrap();

    let (current, favorite) = {
        let state = app::setup(temp_dir.path().to_path_buf(), Arc::new(LogNotifier))
            .await
            .unwrap();

        state
            .preferences
            .set_preferred_categories([QuoteCategory::Focus].into_iter().collect()).await
            .unwrap();
        state
            .preferences
            .set_auto_change(true, AutoChangeInterval::Daily).await
            .unwrap();

        let first = state.engine.advance().await.unwrap();
        let second = state.engine.advance().await.unwrap();
        state.engine.toggle_favorite(&first).await.unwrap();

        state.rotation.shutdown().await;
        (second, first)
    };

    assert!(temp_dir.path().join("store").join("currentQuote.json").exists());

    let state = app::setup(temp_dir.path().to_path_buf(), Arc::new(LogNotifier))
        .await
        .unwrap();

    let prefs = state.preferences.get();
    assert_eq!(
        prefs.preferred_categories,
        [QuoteCategory::Focus].into_iter().collect::<BTreeSet<_>>()
    );
    assert!(prefs.auto_change_quote);
    assert_eq!(prefs.auto_change_interval, AutoChangeInterval::Daily);
    assert_eq!(
        state.rotation.auto_change_state().await,
        TimerState::Running(Duration::from_secs(24 * 60 * 60))
    );

    let snapshot = state.engine.snapshot().await;
    assert_eq!(snapshot.current.id, current.id);
    assert_eq!(snapshot.history.len(), 2);
    assert_eq!(snapshot.history[0].id, current.id);
    assert_eq!(snapshot.favorites.len(), 1);
    assert_eq!(snapshot.favorites[0].id, favorite.id);
    assert_eq!(snapshot.current.category, QuoteCategory::Focus);

    state.rotation.shutdown().await;
}

#[tokio::test]
async fn test_corrupt_store_values_fall_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("store"));
    store.initialize().await.unwrap();
    store.write("quoteHistory", "{not json").await.unwrap();
    store.write("notificationInterval", "\"fortnightly\"").await.unwrap();

    let state = app::setup(temp_dir.path().to_path_buf(), Arc::new(LogNotifier))
        .await
        .unwrap();

    assert!(state.engine.history().await.is_empty());
    assert_eq!(
        state.preferences.get().notification_interval,
        NotificationInterval::Daily
    );

    state.rotation.shutdown().await;
}

#[tokio::test]
async fn test_reset_all_data_forgets_cached_remote_quote() {
    let temp_dir = TempDir::new().unwrap();
    let store = FileStore::new(temp_dir.path().join("store"));
    store.initialize().await.unwrap();
    store.write("lastQuote", "\"Cached words.\"").await.unwrap();

    let state = app::setup(temp_dir.path().to_path_buf(), Arc::new(LogNotifier))
        .await
        .unwrap();
    assert_eq!(
        state.remote.cached_or_stored().await.as_deref(),
        Some("Cached words.")
    );

    state.reset_all_data().await.unwrap();

    assert!(state.remote.cached_or_stored().await.is_none());
    assert!(!temp_dir.path().join("store").join("lastQuote.json").exists());
    assert!(state.engine.history().await.is_empty());

    state.rotation.shutdown().await;
}

#[tokio::test]
async fn test_preferred_category_filters_selection() {
    let catalog = Catalog::from_quotes(vec![
        quote("A", QuoteCategory::Courage),
        quote("B", QuoteCategory::Growth),
        quote("C", QuoteCategory::Growth),
    ])
    .unwrap();
    let (engine, prefs) = create_test_engine(catalog, None).await;
    prefs
        .set_preferred_categories([QuoteCategory::Growth].into_iter().collect()).await
        .unwrap();

    for _ in 0..50 {
        let picked = engine.pick_next().await.unwrap();
        assert!(picked.content == "B" || picked.content == "C");
    }
}

#[tokio::test]
async fn test_exhausted_recent_window_repeats_instead_of_failing() {
    let growth: Vec<Quote> = (1..=5)
        .map(|i| quote(&format!("Growth {}", i), QuoteCategory::Growth))
        .collect();
    let mut all = growth.clone();
    all.push(quote("Stand tall", QuoteCategory::Courage));
    let (engine, prefs) = create_test_engine(Catalog::from_quotes(all).unwrap(), None).await;
    prefs
        .set_preferred_categories([QuoteCategory::Growth].into_iter().collect()).await
        .unwrap();

    for q in &growth {
        engine.set_current_quote(q.clone()).await.unwrap();
    }

    let picked = engine.advance().await.unwrap();
    assert_eq!(picked.category, QuoteCategory::Growth);
    assert!(growth.iter().any(|g| g.content == picked.content));
}

#[tokio::test]
async fn test_timed_out_fetch_falls_back_to_local_quote() {
    // Accepts connections but never answers
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let client = reqwest::Client::builder()
        .no_proxy()
        .timeout(Duration::from_millis(200))
        .build()
        .unwrap();
    let source = HttpQuoteSource::with_client(client, format!("http://{}/random", addr));
    let (engine, prefs) = create_test_engine(Catalog::builtin(), Some(Arc::new(source))).await;
    prefs.set_use_online_quotes(true).await.unwrap();
    let before = engine.current_quote().await;

    let after = engine.fetch_online_quote().await.unwrap().unwrap();

    assert_ne!(after.id, before.id);
    assert_eq!(engine.current_quote().await.id, after.id);
    assert!(engine.catalog().find(after.id).is_some());
    assert!(engine.last_error().await.unwrap().is_network());
    assert!(!engine.is_loading());
}

#[tokio::test]
async fn test_notification_favorite_then_export() {
    let temp_dir = TempDir::new().unwrap();
    let (engine, _prefs) = create_test_engine(Catalog::builtin(), None).await;

    let notified = engine.pick_next().await.unwrap();
    engine
        .handle_notification_action(NotificationAction::MarkFavorite { quote_id: notified.id })
        .await
        .unwrap();

    let path = temp_dir
        .path()
        .join("exports")
        .join(ExportFormat::Json.default_file_name());
    engine.export_favorites_to(&path, ExportFormat::Json).await.unwrap();

    let exported: Vec<Quote> =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].id, notified.id);
}

#[tokio::test(start_paused = true)]
async fn test_rotation_follows_preferences_on_virtual_time() {
    let (engine, prefs) = create_test_engine(Catalog::builtin(), None).await;
    let controller = Arc::new(RotationController::new(
        engine.clone(),
        prefs.clone(),
        Arc::new(LogNotifier),
        Arc::new(IntervalScheduler),
    ));
    controller.start().await;

    prefs.set_auto_change(true, AutoChangeInterval::Hourly).await.unwrap();
    let hour = Duration::from_secs(60 * 60);

    tokio::time::sleep(hour * 3 + Duration::from_secs(1)).await;
    assert_eq!(engine.history().await.len(), 3);

    prefs.set_auto_change(false, AutoChangeInterval::Hourly).await.unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(controller.auto_change_state().await, TimerState::Stopped);

    tokio::time::sleep(hour * 5).await;
    assert_eq!(engine.history().await.len(), 3);

    controller.shutdown().await;
}
