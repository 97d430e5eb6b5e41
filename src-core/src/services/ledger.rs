//! History and favorites ledger
//!
//! Owns the current quote, the capped history and the favorites list.
//! Every mutation writes a full snapshot of what it touched.

use crate::config::{
    KEY_CURRENT_QUOTE, KEY_FAVORITE_QUOTES, KEY_LAST_QUOTE, KEY_QUOTE_HISTORY, MAX_HISTORY_COUNT,
};
use crate::error::{AppError, Result};
use crate::models::Quote;
use crate::storage::{load_json, save_json, KeyValueStore};
use std::sync::Arc;
use uuid::Uuid;

/// Current quote, history (most recent first) and favorites
pub struct Ledger {
    store: Arc<dyn KeyValueStore>,
    current: Quote,
    history: Vec<Quote>,
    favorites: Vec<Quote>,
}

impl Ledger {
    /// Load persisted state; `initial` becomes current when none is stored
    pub async fn load(store: Arc<dyn KeyValueStore>, initial: Quote) -> Self {
        let current = load_json::<Quote>(store.as_ref(), KEY_CURRENT_QUOTE)
            .await
            .filter(Quote::is_valid)
            .unwrap_or(initial);

        let mut history = load_quotes(store.as_ref(), KEY_QUOTE_HISTORY).await;
        history.truncate(MAX_HISTORY_COUNT);
        let favorites = load_quotes(store.as_ref(), KEY_FAVORITE_QUOTES).await;

        tracing::debug!(
            "Ledger loaded: {} history, {} favorites",
            history.len(),
            favorites.len()
        );

        Self {
            store,
            current,
            history,
            favorites,
        }
    }

    pub fn current(&self) -> &Quote {
        &self.current
    }

    pub fn history(&self) -> &[Quote] {
        &self.history
    }

    pub fn favorites(&self) -> &[Quote] {
        &self.favorites
    }

    /// Favorites newest first by the date each quote was created
    pub fn favorites_by_date(&self) -> Vec<Quote> {
        let mut favorites = self.favorites.clone();
        favorites.sort_by(|a, b| b.date_added.cmp(&a.date_added));
        favorites
    }

    /// Make `quote` current and move it to the front of history.
    ///
    /// Records with blank content are rejected before anything changes.
    pub async fn commit(&mut self, quote: Quote) -> Result<()> {
        if !quote.is_valid() {
            return Err(AppError::InvalidQuote(format!(
                "refusing to commit {} with empty content",
                quote.id
            )));
        }

        self.history.retain(|q| q.id != quote.id);
        self.history.insert(0, quote.clone());
        self.history.truncate(MAX_HISTORY_COUNT);
        self.current = quote;

        save_json(self.store.as_ref(), KEY_CURRENT_QUOTE, &self.current).await?;
        save_json(self.store.as_ref(), KEY_QUOTE_HISTORY, &self.history).await?;
        Ok(())
    }

    /// Add or remove `quote` from favorites; returns whether it is now a favorite
    pub async fn toggle_favorite(&mut self, quote: &Quote) -> Result<bool> {
        let now_favorite = if self.is_favorite(quote.id) {
            self.favorites.retain(|q| q.id != quote.id);
            false
        } else {
            self.favorites.push(quote.clone());
            true
        };

        self.save_favorites().await?;
        Ok(now_favorite)
    }

    /// Add `quote` to favorites unless it already is one
    pub async fn mark_favorite(&mut self, quote: &Quote) -> Result<()> {
        if self.is_favorite(quote.id) {
            return Ok(());
        }
        self.favorites.push(quote.clone());
        self.save_favorites().await
    }

    pub fn is_favorite(&self, id: Uuid) -> bool {
        self.favorites.iter().any(|q| q.id == id)
    }

    /// Look a quote up among current, history and favorites
    pub fn find(&self, id: Uuid) -> Option<&Quote> {
        std::iter::once(&self.current)
            .chain(self.history.iter())
            .chain(self.favorites.iter())
            .find(|q| q.id == id)
    }

    pub async fn clear_history(&mut self) -> Result<()> {
        self.history.clear();
        save_json(self.store.as_ref(), KEY_QUOTE_HISTORY, &self.history).await
    }

    pub async fn clear_favorites(&mut self) -> Result<()> {
        self.favorites.clear();
        self.store.remove(KEY_FAVORITE_QUOTES).await
    }

    /// Drop history, favorites and every persisted quote key.
    ///
    /// The in-memory current quote is kept; a restart falls back to the
    /// catalog's first quote.
    pub async fn reset(&mut self) -> Result<()> {
        self.history.clear();
        self.favorites.clear();

        for key in [
            KEY_FAVORITE_QUOTES,
            KEY_QUOTE_HISTORY,
            KEY_CURRENT_QUOTE,
            KEY_LAST_QUOTE,
        ] {
            self.store.remove(key).await?;
        }

        tracing::info!("Ledger reset");
        Ok(())
    }

    async fn save_favorites(&self) -> Result<()> {
        save_json(self.store.as_ref(), KEY_FAVORITE_QUOTES, &self.favorites).await
    }
}

async fn load_quotes(store: &dyn KeyValueStore, key: &str) -> Vec<Quote> {
    let mut quotes: Vec<Quote> = load_json(store, key).await.unwrap_or_default();
    let before = quotes.len();
    quotes.retain(Quote::is_valid);
    if quotes.len() != before {
        tracing::warn!("Dropped {} invalid quotes from {}", before - quotes.len(), key);
    }
    quotes
}
