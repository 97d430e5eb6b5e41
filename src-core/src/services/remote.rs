//! Remote quote source
//!
//! Fetches a single random quote over HTTP. There is no retry and no
//! timeout beyond the HTTP client's default; callers fall back to the local
//! catalog when a fetch fails.

use crate::config::{HTTP_USER_AGENT, KEY_LAST_QUOTE};
use crate::error::{AppError, Result};
use crate::storage::{load_json, save_json, KeyValueStore};
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

/// Boxed future returned by [`QuoteSource::fetch_random_quote`]
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Anything that can produce the text of a random quote
pub trait QuoteSource: Send + Sync {
    fn fetch_random_quote(&self) -> FetchFuture<'_>;
}

/// Response body of the quote endpoint
#[derive(Deserialize, Debug)]
struct QuoteResponse {
    content: String,
    #[allow(dead_code)]
    author: Option<String>,
}

/// HTTP-backed quote source
#[derive(Clone)]
pub struct HttpQuoteSource {
    client: reqwest::Client,
    url: String,
}

impl HttpQuoteSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(HTTP_USER_AGENT)
            .build()
            .map_err(|e| AppError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self::with_client(client, url))
    }

    /// Use a preconfigured client (custom proxy or TLS settings)
    pub fn with_client(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    async fn fetch(&self) -> Result<String> {
        tracing::debug!("Fetching random quote from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| AppError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            tracing::warn!("Quote endpoint returned status: {}", status);
            return Err(AppError::Network(format!(
                "Server returned status: {}",
                status
            )));
        }

        let body: QuoteResponse = response
            .json()
            .await
            .map_err(|e| AppError::Network(format!("Failed to decode quote: {}", e)))?;

        if body.content.trim().is_empty() {
            return Err(AppError::Network("Server returned an empty quote".to_string()));
        }

        Ok(body.content)
    }
}

impl QuoteSource for HttpQuoteSource {
    fn fetch_random_quote(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch())
    }
}

/// Wraps a source and remembers the last quote it returned.
///
/// The last quote is kept in memory and persisted under `lastQuote`, so it
/// is still available after a restart or while offline.
pub struct CachingQuoteSource<S> {
    inner: S,
    store: Arc<dyn KeyValueStore>,
    cached: Mutex<Option<String>>,
}

impl<S: QuoteSource> CachingQuoteSource<S> {
    pub fn new(inner: S, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner,
            store,
            cached: Mutex::new(None),
        }
    }

    /// Last fetched quote from memory, else from the store
    pub async fn cached_or_stored(&self) -> Option<String> {
        let cached = self.lock_cache().clone();
        if cached.is_some() {
            return cached;
        }

        let stored: Option<String> = load_json(self.store.as_ref(), KEY_LAST_QUOTE).await;
        if stored.is_some() {
            *self.lock_cache() = stored.clone();
        }
        stored
    }

    /// Forget the in-memory copy; the persisted key is left to its owner
    pub fn clear_cache(&self) {
        *self.lock_cache() = None;
    }

    fn lock_cache(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.cached.lock().unwrap_or_else(|e| e.into_inner())
    }

    async fn fetch_and_cache(&self) -> Result<String> {
        let fetched = self.inner.fetch_random_quote().await?;

        *self.lock_cache() = Some(fetched.clone());
        if let Err(e) = save_json(self.store.as_ref(), KEY_LAST_QUOTE, &fetched).await {
            tracing::warn!("Failed to persist last fetched quote: {}", e);
        }

        Ok(fetched)
    }
}

impl<S: QuoteSource> QuoteSource for CachingQuoteSource<S> {
    fn fetch_random_quote(&self) -> FetchFuture<'_> {
        Box::pin(self.fetch_and_cache())
    }
}
