//! Application state and initialization
//!
//! This module wires the store, preferences, quote engine and rotation
//! timers together. All services are created here and made available
//! through AppState.

use crate::catalog::Catalog;
use crate::config::{APP_NAME, DATA_DIR_ENV, REMOTE_QUOTE_URL, STORE_DIR};
use crate::error::{AppError, Result};
use crate::services::{
    CachingQuoteSource, HttpQuoteSource, IntervalScheduler, NotificationSink, PreferencesService,
    QuoteEngine, QuoteSource, RotationController,
};
use crate::storage::{FileStore, KeyValueStore};
use std::path::PathBuf;
use std::sync::Arc;

/// Central application state holding all services
#[derive(Clone)]
pub struct AppState {
    pub app_data_dir: PathBuf,
    pub preferences: PreferencesService,
    pub engine: QuoteEngine,
    pub rotation: Arc<RotationController>,
    pub remote: Arc<CachingQuoteSource<HttpQuoteSource>>,
}

impl AppState {
    /// Forget history, favorites and every cached quote
    pub async fn reset_all_data(&self) -> Result<()> {
        let result = self.engine.reset_all_data().await;
        self.remote.clear_cache();
        tracing::info!("All quote data reset");
        result
    }
}

/// Data directory: `$WHISPERZEN_DATA_DIR`, else the platform data dir
pub fn default_data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_NAME))
        .ok_or_else(|| AppError::Generic("Failed to get app data dir".to_string()))
}

/// Application setup - called once on startup
pub async fn setup(app_data_dir: PathBuf, notifier: Arc<dyn NotificationSink>) -> Result<AppState> {
    tracing::info!("Initializing application");
    tracing::info!("App data directory: {:?}", app_data_dir);

    tokio::fs::create_dir_all(&app_data_dir).await?;

    let file_store = FileStore::new(app_data_dir.join(STORE_DIR));
    file_store.initialize().await?;
    let store: Arc<dyn KeyValueStore> = Arc::new(file_store);

    let preferences = PreferencesService::load(store.clone()).await;
    let remote = Arc::new(CachingQuoteSource::new(
        HttpQuoteSource::new(REMOTE_QUOTE_URL)?,
        store.clone(),
    ));

    let catalog = Arc::new(Catalog::builtin());
    tracing::debug!("Loaded {} built-in quotes", catalog.len());

    let source: Arc<dyn QuoteSource> = remote.clone();
    let engine = QuoteEngine::new(catalog, preferences.clone(), store, Some(source)).await?;

    let rotation = Arc::new(RotationController::new(
        engine.clone(),
        preferences.clone(),
        notifier,
        Arc::new(IntervalScheduler),
    ));
    rotation.start().await;

    tracing::info!("Application initialized successfully");

    Ok(AppState {
        app_data_dir,
        preferences,
        engine,
        rotation,
        remote,
    })
}
