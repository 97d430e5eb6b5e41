//! Quote engine
//!
//! Single owner of the mutable quote state: the ledger, the random number
//! generator and the user-visible error. Every mutation runs under one
//! async mutex, so user actions, timer ticks, notification actions and
//! fetch completions never interleave. The remote fetch is awaited outside
//! the lock.

use crate::catalog::Catalog;
use crate::error::{AppError, QuoteError, Result};
use crate::models::{filter_quotes, Preferences, Quote, QuoteCategory};
use crate::services::export::{self, ExportFormat};
use crate::services::ledger::Ledger;
use crate::services::notifications::NotificationAction;
use crate::services::preferences::PreferencesService;
use crate::services::remote::QuoteSource;
use crate::services::selection;
use crate::storage::KeyValueStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use uuid::Uuid;

/// What observers see after each change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSnapshot {
    pub current: Quote,
    pub history: Vec<Quote>,
    pub favorites: Vec<Quote>,
    pub is_loading: bool,
    pub last_error: Option<QuoteError>,
}

struct EngineState {
    ledger: Ledger,
    rng: StdRng,
    last_error: Option<QuoteError>,
}

/// Handle to the quote engine; clones share the same state
#[derive(Clone)]
pub struct QuoteEngine {
    catalog: Arc<Catalog>,
    preferences: PreferencesService,
    remote: Option<Arc<dyn QuoteSource>>,
    state: Arc<Mutex<EngineState>>,
    in_flight: Arc<AtomicUsize>,
    events: Arc<watch::Sender<EngineSnapshot>>,
}

impl QuoteEngine {
    /// Build the engine over persisted ledger state
    pub async fn new(
        catalog: Arc<Catalog>,
        preferences: PreferencesService,
        store: Arc<dyn KeyValueStore>,
        remote: Option<Arc<dyn QuoteSource>>,
    ) -> Result<Self> {
        Self::with_rng(catalog, preferences, store, remote, StdRng::from_entropy()).await
    }

    /// Same as [`QuoteEngine::new`] with a caller-provided generator
    pub async fn with_rng(
        catalog: Arc<Catalog>,
        preferences: PreferencesService,
        store: Arc<dyn KeyValueStore>,
        remote: Option<Arc<dyn QuoteSource>>,
        rng: StdRng,
    ) -> Result<Self> {
        let initial = catalog.first().cloned().ok_or(AppError::NoQuotesAvailable)?;
        let ledger = Ledger::load(store, initial).await;

        let snapshot = EngineSnapshot {
            current: ledger.current().clone(),
            history: ledger.history().to_vec(),
            favorites: ledger.favorites().to_vec(),
            is_loading: false,
            last_error: None,
        };
        let (events, _rx) = watch::channel(snapshot);

        Ok(Self {
            catalog,
            preferences,
            remote,
            state: Arc::new(Mutex::new(EngineState {
                ledger,
                rng,
                last_error: None,
            })),
            in_flight: Arc::new(AtomicUsize::new(0)),
            events: Arc::new(events),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Receive a snapshot after every change
    pub fn subscribe(&self) -> watch::Receiver<EngineSnapshot> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> EngineSnapshot {
        let state = self.state.lock().await;
        self.capture(&state)
    }

    pub async fn current_quote(&self) -> Quote {
        self.state.lock().await.ledger.current().clone()
    }

    pub async fn history(&self) -> Vec<Quote> {
        self.state.lock().await.ledger.history().to_vec()
    }

    /// Favorites in insertion order
    pub async fn favorites(&self) -> Vec<Quote> {
        self.state.lock().await.ledger.favorites().to_vec()
    }

    /// Whether any online fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    pub async fn last_error(&self) -> Option<QuoteError> {
        self.state.lock().await.last_error.clone()
    }

    /// Choose a quote without changing any state
    pub async fn pick_next(&self) -> Result<Quote> {
        let preferences = self.preferences.get();
        let mut state = self.state.lock().await;
        let EngineState { ledger, rng, .. } = &mut *state;
        selection::pick_next(&self.catalog, &preferences, ledger.history(), rng)
    }

    /// Pick the next quote and commit it in one step
    pub async fn advance(&self) -> Result<Quote> {
        let preferences = self.preferences.get();
        let mut state = self.state.lock().await;
        self.advance_locked(&mut state, &preferences).await
    }

    /// Make `quote` the current quote; blank records are rejected
    pub async fn set_current_quote(&self, quote: Quote) -> Result<()> {
        let mut state = self.state.lock().await;
        let result = state.ledger.commit(quote).await;
        self.publish(&state);
        result
    }

    /// Toggle `quote` in favorites; returns whether it is now a favorite
    pub async fn toggle_favorite(&self, quote: &Quote) -> Result<bool> {
        let mut state = self.state.lock().await;
        let result = state.ledger.toggle_favorite(quote).await;
        self.publish(&state);
        result
    }

    /// Toggle the current quote in favorites
    pub async fn toggle_current_favorite(&self) -> Result<bool> {
        let mut state = self.state.lock().await;
        let current = state.ledger.current().clone();
        let result = state.ledger.toggle_favorite(&current).await;
        self.publish(&state);
        result
    }

    pub async fn is_favorite(&self, quote: &Quote) -> bool {
        self.state.lock().await.ledger.is_favorite(quote.id)
    }

    /// Clipboard text of the current quote
    pub async fn share_text(&self) -> String {
        self.state.lock().await.ledger.current().share_text()
    }

    /// Fetch a quote from the remote source and make it current.
    ///
    /// Returns `None` without doing anything when online quotes are
    /// disabled or no remote source is configured. On failure the error is
    /// recorded and a local quote is committed instead, so the caller
    /// always ends up with a fresh quote.
    pub async fn fetch_online_quote(&self) -> Result<Option<Quote>> {
        if !self.preferences.get().use_online_quotes {
            return Ok(None);
        }
        let Some(remote) = self.remote.clone() else {
            tracing::debug!("Online quotes enabled but no remote source configured");
            return Ok(None);
        };

        let loading = {
            let mut state = self.state.lock().await;
            state.last_error = None;
            let loading = LoadingGuard::start(&self.in_flight, &self.events);
            self.publish(&state);
            loading
        };

        let fetched = remote.fetch_random_quote().await;

        let preferences = self.preferences.get();
        let mut state = self.state.lock().await;
        drop(loading);

        let result = match fetched.and_then(|content| Quote::new(content, None, QuoteCategory::Motivation)) {
            Ok(quote) => {
                tracing::info!("Fetched online quote {}", quote.id);
                state.last_error = None;
                let committed = state.ledger.commit(quote.clone()).await.map(|_| quote);
                self.publish(&state);
                committed
            }
            Err(e) => {
                tracing::warn!("Online quote fetch failed, using a local quote: {}", e);
                state.last_error = Some(QuoteError::from(&e));
                self.advance_locked(&mut state, &preferences).await
            }
        };

        result.map(Some)
    }

    /// Route a notification action into the ledger or selection
    pub async fn handle_notification_action(
        &self,
        action: NotificationAction,
    ) -> Result<Option<Quote>> {
        match action {
            NotificationAction::ShowNewQuote => self.advance().await.map(Some),
            NotificationAction::MarkFavorite { quote_id } => {
                let mut state = self.state.lock().await;
                let Some(quote) = self.resolve(&state, quote_id) else {
                    tracing::warn!("Notification referenced unknown quote {}", quote_id);
                    return Ok(None);
                };

                let result = state.ledger.mark_favorite(&quote).await;
                self.publish(&state);
                result.map(|_| Some(quote))
            }
        }
    }

    /// Search history by text and category
    pub async fn search_history(&self, query: &str, category: Option<QuoteCategory>) -> Vec<Quote> {
        let state = self.state.lock().await;
        filter_quotes(state.ledger.history(), query, category)
    }

    /// Search favorites by text and category, newest first
    pub async fn search_favorites(
        &self,
        query: &str,
        category: Option<QuoteCategory>,
    ) -> Vec<Quote> {
        let state = self.state.lock().await;
        filter_quotes(&state.ledger.favorites_by_date(), query, category)
    }

    pub async fn clear_history(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let result = state.ledger.clear_history().await;
        self.publish(&state);
        result
    }

    pub async fn clear_favorites(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        let result = state.ledger.clear_favorites().await;
        self.publish(&state);
        result
    }

    /// Delete favorites, history and persisted quote state
    pub async fn reset_all_data(&self) -> Result<()> {
        let mut state = self.state.lock().await;
        state.last_error = None;
        let result = state.ledger.reset().await;
        self.publish(&state);
        result
    }

    /// Render favorites in `format`
    pub async fn export_favorites(&self, format: ExportFormat) -> Result<String> {
        let favorites = self.favorites().await;
        export::render(&favorites, format)
    }

    /// Render favorites and write them to `path`
    pub async fn export_favorites_to(&self, path: &Path, format: ExportFormat) -> Result<()> {
        let contents = self.export_favorites(format).await?;
        export::write_export(path, &contents).await
    }

    async fn advance_locked(
        &self,
        state: &mut EngineState,
        preferences: &Preferences,
    ) -> Result<Quote> {
        let quote = selection::pick_next(&self.catalog, preferences, state.ledger.history(), &mut state.rng)?;
        let result = state.ledger.commit(quote.clone()).await;
        self.publish(state);
        tracing::debug!("Advanced to quote {}", quote.id);
        result.map(|_| quote)
    }

    fn resolve(&self, state: &EngineState, id: Uuid) -> Option<Quote> {
        state
            .ledger
            .find(id)
            .or_else(|| self.catalog.find(id))
            .cloned()
    }

    fn capture(&self, state: &EngineState) -> EngineSnapshot {
        EngineSnapshot {
            current: state.ledger.current().clone(),
            history: state.ledger.history().to_vec(),
            favorites: state.ledger.favorites().to_vec(),
            is_loading: self.is_loading(),
            last_error: state.last_error.clone(),
        }
    }

    fn publish(&self, state: &EngineState) {
        self.events.send_replace(self.capture(state));
    }
}

/// Counts one in-flight fetch until dropped.
///
/// Dropping also runs when the caller abandons the fetch future, so the
/// loading flag never outlives the request.
struct LoadingGuard {
    in_flight: Arc<AtomicUsize>,
    events: Arc<watch::Sender<EngineSnapshot>>,
}

impl LoadingGuard {
    fn start(in_flight: &Arc<AtomicUsize>, events: &Arc<watch::Sender<EngineSnapshot>>) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self {
            in_flight: Arc::clone(in_flight),
            events: Arc::clone(events),
        }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        let loading = self.in_flight.fetch_sub(1, Ordering::SeqCst) > 1;
        self.events.send_if_modified(|snapshot| {
            let changed = snapshot.is_loading != loading;
            snapshot.is_loading = loading;
            changed
        });
    }
}
