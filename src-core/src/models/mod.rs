//! Domain models
//!
//! Quotes, categories, and user preferences.

pub mod preferences;
pub mod quote;

pub use preferences::{
    AppearanceMode, AutoChangeInterval, MenuBarIcon, NotificationInterval, PopoverSize,
    Preferences,
};
pub use quote::{filter_quotes, Quote, QuoteCategory};
