//! User preferences model
//!
//! Every field is persisted under its own key so that a corrupt or missing
//! value only resets that one field to its default.

use crate::config;
use crate::models::QuoteCategory;
use crate::storage::{load_json, save_json, KeyValueStore};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

const HOUR_SECS: u64 = 60 * 60;
const DAY_SECS: u64 = 24 * HOUR_SECS;

/// How often a quote notification is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationInterval {
    Never,
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl NotificationInterval {
    pub fn display_name(self) -> &'static str {
        match self {
            NotificationInterval::Never => "Never",
            NotificationInterval::Daily => "Daily",
            NotificationInterval::Weekly => "Weekly",
            NotificationInterval::Monthly => "Monthly",
        }
    }

    /// Repeat period, `None` for `Never`
    pub fn duration(self) -> Option<Duration> {
        match self {
            NotificationInterval::Never => None,
            NotificationInterval::Daily => Some(Duration::from_secs(DAY_SECS)),
            NotificationInterval::Weekly => Some(Duration::from_secs(7 * DAY_SECS)),
            NotificationInterval::Monthly => Some(Duration::from_secs(30 * DAY_SECS)),
        }
    }
}

/// How often the current quote rotates on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AutoChangeInterval {
    Never,
    #[default]
    Hourly,
    Daily,
    Weekly,
}

impl AutoChangeInterval {
    pub fn display_name(self) -> &'static str {
        match self {
            AutoChangeInterval::Never => "Never",
            AutoChangeInterval::Hourly => "Every Hour",
            AutoChangeInterval::Daily => "Daily",
            AutoChangeInterval::Weekly => "Weekly",
        }
    }

    /// Rotation period, `None` for `Never`
    pub fn duration(self) -> Option<Duration> {
        match self {
            AutoChangeInterval::Never => None,
            AutoChangeInterval::Hourly => Some(Duration::from_secs(HOUR_SECS)),
            AutoChangeInterval::Daily => Some(Duration::from_secs(DAY_SECS)),
            AutoChangeInterval::Weekly => Some(Duration::from_secs(7 * DAY_SECS)),
        }
    }
}

/// Menu bar icon choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MenuBarIcon {
    #[default]
    #[serde(rename = "quote.bubble")]
    Quote,
    #[serde(rename = "leaf")]
    Zen,
    #[serde(rename = "brain.head.profile")]
    Wisdom,
    #[serde(rename = "lightbulb")]
    Inspiration,
    #[serde(rename = "circle.hexagongrid")]
    Mindfulness,
}

impl MenuBarIcon {
    pub fn display_name(self) -> &'static str {
        match self {
            MenuBarIcon::Quote => "Quote Bubble",
            MenuBarIcon::Zen => "Zen Leaf",
            MenuBarIcon::Wisdom => "Wisdom",
            MenuBarIcon::Inspiration => "Inspiration",
            MenuBarIcon::Mindfulness => "Mindfulness",
        }
    }
}

/// Popover size preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PopoverSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl PopoverSize {
    /// Width and height in points
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PopoverSize::Small => (300, 200),
            PopoverSize::Medium => (400, 280),
            PopoverSize::Large => (500, 360),
        }
    }
}

/// Light/dark appearance override
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppearanceMode {
    #[default]
    Auto,
    Light,
    Dark,
}

/// User preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub show_notifications: bool,
    pub notification_interval: NotificationInterval,
    pub auto_change_quote: bool,
    pub auto_change_interval: AutoChangeInterval,
    /// Empty means every category qualifies
    pub preferred_categories: BTreeSet<QuoteCategory>,
    pub use_online_quotes: bool,
    pub sound_enabled: bool,
    pub launch_at_login: bool,
    pub menu_bar_icon: MenuBarIcon,
    pub popover_size: PopoverSize,
    pub appearance_mode: AppearanceMode,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            show_notifications: false,
            notification_interval: NotificationInterval::default(),
            auto_change_quote: false,
            auto_change_interval: AutoChangeInterval::default(),
            preferred_categories: QuoteCategory::ALL.into_iter().collect(),
            use_online_quotes: false,
            sound_enabled: false,
            launch_at_login: false,
            menu_bar_icon: MenuBarIcon::default(),
            popover_size: PopoverSize::default(),
            appearance_mode: AppearanceMode::default(),
        }
    }
}

impl Preferences {
    /// Whether `category` passes the category filter
    pub fn allows(&self, category: QuoteCategory) -> bool {
        self.preferred_categories.is_empty() || self.preferred_categories.contains(&category)
    }

    /// Auto-change period when rotation is enabled
    pub fn auto_change_period(&self) -> Option<Duration> {
        if !self.auto_change_quote {
            return None;
        }
        self.auto_change_interval.duration()
    }

    /// Notification period when notifications are enabled
    pub fn notification_period(&self) -> Option<Duration> {
        if !self.show_notifications {
            return None;
        }
        self.notification_interval.duration()
    }

    /// Load every field from the store, defaulting absent or corrupt keys
    pub async fn load_from(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();

        Self {
            show_notifications: load_json(store, config::KEY_SHOW_NOTIFICATIONS)
                .await
                .unwrap_or(defaults.show_notifications),
            notification_interval: load_json(store, config::KEY_NOTIFICATION_INTERVAL)
                .await
                .unwrap_or(defaults.notification_interval),
            auto_change_quote: load_json(store, config::KEY_AUTO_CHANGE_QUOTE)
                .await
                .unwrap_or(defaults.auto_change_quote),
            auto_change_interval: load_json(store, config::KEY_AUTO_CHANGE_INTERVAL)
                .await
                .unwrap_or(defaults.auto_change_interval),
            preferred_categories: load_json(store, config::KEY_PREFERRED_CATEGORIES)
                .await
                .unwrap_or(defaults.preferred_categories),
            use_online_quotes: load_json(store, config::KEY_USE_ONLINE_QUOTES)
                .await
                .unwrap_or(defaults.use_online_quotes),
            sound_enabled: load_json(store, config::KEY_SOUND_ENABLED)
                .await
                .unwrap_or(defaults.sound_enabled),
            launch_at_login: load_json(store, config::KEY_LAUNCH_AT_LOGIN)
                .await
                .unwrap_or(defaults.launch_at_login),
            menu_bar_icon: load_json(store, config::KEY_MENU_BAR_ICON)
                .await
                .unwrap_or(defaults.menu_bar_icon),
            popover_size: load_json(store, config::KEY_POPOVER_SIZE)
                .await
                .unwrap_or(defaults.popover_size),
            appearance_mode: load_json(store, config::KEY_APPEARANCE_MODE)
                .await
                .unwrap_or(defaults.appearance_mode),
        }
    }

    /// Write every field to the store
    pub async fn persist_to(&self, store: &dyn KeyValueStore) -> Result<()> {
        save_json(store, config::KEY_SHOW_NOTIFICATIONS, &self.show_notifications).await?;
        save_json(store, config::KEY_NOTIFICATION_INTERVAL, &self.notification_interval).await?;
        save_json(store, config::KEY_AUTO_CHANGE_QUOTE, &self.auto_change_quote).await?;
        save_json(store, config::KEY_AUTO_CHANGE_INTERVAL, &self.auto_change_interval).await?;
        save_json(store, config::KEY_PREFERRED_CATEGORIES, &self.preferred_categories).await?;
        save_json(store, config::KEY_USE_ONLINE_QUOTES, &self.use_online_quotes).await?;
        save_json(store, config::KEY_SOUND_ENABLED, &self.sound_enabled).await?;
        save_json(store, config::KEY_LAUNCH_AT_LOGIN, &self.launch_at_login).await?;
        save_json(store, config::KEY_MENU_BAR_ICON, &self.menu_bar_icon).await?;
        save_json(store, config::KEY_POPOVER_SIZE, &self.popover_size).await?;
        save_json(store, config::KEY_APPEARANCE_MODE, &self.appearance_mode).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();

        assert!(!prefs.show_notifications);
        assert_eq!(prefs.notification_interval, NotificationInterval::Daily);
        assert!(!prefs.auto_change_quote);
        assert_eq!(prefs.auto_change_interval, AutoChangeInterval::Hourly);
        assert_eq!(prefs.preferred_categories.len(), 10);
        assert!(!prefs.use_online_quotes);
        assert!(!prefs.sound_enabled);
        assert_eq!(prefs.menu_bar_icon, MenuBarIcon::Quote);
        assert_eq!(prefs.popover_size, PopoverSize::Medium);
        assert_eq!(prefs.appearance_mode, AppearanceMode::Auto);
    }

    #[test]
    fn test_interval_durations() {
        assert_eq!(AutoChangeInterval::Never.duration(), None);
        assert_eq!(AutoChangeInterval::Hourly.duration(), Some(Duration::from_secs(3600)));
        assert_eq!(NotificationInterval::Weekly.duration(), Some(Duration::from_secs(604_800)));
        assert_eq!(NotificationInterval::Monthly.duration(), Some(Duration::from_secs(2_592_000)));
    }

    #[test]
    fn test_periods_require_enabled_flag() {
        let mut prefs = Preferences::default();
        assert_eq!(prefs.auto_change_period(), None);
        assert_eq!(prefs.notification_period(), None);

        prefs.auto_change_quote = true;
        prefs.show_notifications = true;
        assert_eq!(prefs.auto_change_period(), Some(Duration::from_secs(3600)));
        assert_eq!(prefs.notification_period(), Some(Duration::from_secs(86_400)));

        prefs.auto_change_interval = AutoChangeInterval::Never;
        assert_eq!(prefs.auto_change_period(), None);
    }

    #[test]
    fn test_empty_category_set_allows_everything() {
        let mut prefs = Preferences::default();
        prefs.preferred_categories.clear();
        assert!(prefs.allows(QuoteCategory::Courage));

        prefs.preferred_categories.insert(QuoteCategory::Growth);
        assert!(prefs.allows(QuoteCategory::Growth));
        assert!(!prefs.allows(QuoteCategory::Courage));
    }

    #[tokio::test]
    async fn test_persist_and_reload_round_trip() {
        let store = MemoryStore::new();
        let prefs = Preferences {
            show_notifications: true,
            notification_interval: NotificationInterval::Monthly,
            auto_change_quote: true,
            auto_change_interval: AutoChangeInterval::Weekly,
            preferred_categories: [QuoteCategory::Focus, QuoteCategory::Action].into_iter().collect(),
            use_online_quotes: true,
            sound_enabled: true,
            launch_at_login: true,
            menu_bar_icon: MenuBarIcon::Mindfulness,
            popover_size: PopoverSize::Large,
            appearance_mode: AppearanceMode::Dark,
        };

        prefs.persist_to(&store).await.unwrap();
        assert_eq!(Preferences::load_from(&store).await, prefs);
    }

    #[tokio::test]
    async fn test_enum_keys_use_raw_string_values() {
        let store = MemoryStore::new();
        Preferences::default().persist_to(&store).await.unwrap();

        assert_eq!(
            store.read(config::KEY_NOTIFICATION_INTERVAL).await.unwrap().as_deref(),
            Some("\"daily\"")
        );
        assert_eq!(
            store.read(config::KEY_MENU_BAR_ICON).await.unwrap().as_deref(),
            Some("\"quote.bubble\"")
        );
    }

    #[tokio::test]
    async fn test_corrupt_key_falls_back_to_default_for_that_field_only() {
        let store = MemoryStore::new();
        store.write(config::KEY_AUTO_CHANGE_INTERVAL, "\"fortnightly\"").await.unwrap();
        store.write(config::KEY_SOUND_ENABLED, "true").await.unwrap();

        let prefs = Preferences::load_from(&store).await;
        assert_eq!(prefs.auto_change_interval, AutoChangeInterval::Hourly);
        assert!(prefs.sound_enabled);
    }
}
