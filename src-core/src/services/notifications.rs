//! Quote notifications
//!
//! Delivery is an external collaborator behind [`NotificationSink`]. The
//! two actions a user can take on a notification come back in as
//! [`NotificationAction`] values and are routed to the quote engine.

use crate::config::{
    FAVORITE_ACTION_ID, NEW_QUOTE_ACTION_ID, NOTIFICATION_CATEGORY_ID, NOTIFICATION_TITLE,
};
use crate::error::Result;
use crate::models::{Quote, QuoteCategory};
use serde::Serialize;
use std::time::Duration;
use uuid::Uuid;

/// Content handed to the notification system
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteNotification {
    pub title: String,
    pub body: String,
    /// Platform category carrying the favorite and new-quote actions
    pub action_category: String,
    pub sound: bool,
    pub repeat_interval: Duration,
    pub quote_id: Uuid,
    pub category: QuoteCategory,
}

impl QuoteNotification {
    pub fn for_quote(quote: &Quote, sound: bool, repeat_interval: Duration) -> Self {
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            body: quote.content.clone(),
            action_category: NOTIFICATION_CATEGORY_ID.to_string(),
            sound,
            repeat_interval,
            quote_id: quote.id,
            category: quote.category,
        }
    }
}

/// User action taken on a delivered notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationAction {
    MarkFavorite { quote_id: Uuid },
    ShowNewQuote,
}

impl NotificationAction {
    /// Map a platform action identifier back to an action.
    ///
    /// Marking a favorite needs the id of the notified quote.
    pub fn from_identifier(identifier: &str, quote_id: Option<Uuid>) -> Option<Self> {
        match identifier {
            FAVORITE_ACTION_ID => quote_id.map(|quote_id| NotificationAction::MarkFavorite { quote_id }),
            NEW_QUOTE_ACTION_ID => Some(NotificationAction::ShowNewQuote),
            _ => None,
        }
    }
}

/// Delivers quote notifications to the user
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &QuoteNotification) -> Result<()>;

    /// Withdraw pending and delivered notifications
    fn cancel_all(&self) -> Result<()> {
        Ok(())
    }
}

/// Sink that writes notifications to the log (headless mode)
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn deliver(&self, notification: &QuoteNotification) -> Result<()> {
        tracing::info!(
            quote_id = %notification.quote_id,
            category = %notification.category,
            sound = notification.sound,
            "Notification: {} - {}",
            notification.title,
            notification.body
        );
        Ok(())
    }
}
