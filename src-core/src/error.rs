//! Error types for WhisperZen
//!
//! All errors use thiserror for structured error handling.
//! `AppError` is what operations return; `QuoteError` is the user-visible
//! error state kept by the quote engine.

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No quotes available")]
    NoQuotesAvailable,

    #[error("Invalid quote: {0}")]
    InvalidQuote(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("{0}")]
    Generic(String),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

/// Error surfaced to observers of the quote engine.
///
/// Non-fatal: it is cleared by the next successful online fetch.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum QuoteError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("No quotes available")]
    NoQuotesAvailable,
}

impl QuoteError {
    pub fn is_network(&self) -> bool {
        matches!(self, QuoteError::Network(_))
    }
}

impl From<&AppError> for QuoteError {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::NoQuotesAvailable => QuoteError::NoQuotesAvailable,
            AppError::Network(message) => QuoteError::Network(message.clone()),
            other => QuoteError::Network(other.to_string()),
        }
    }
}
