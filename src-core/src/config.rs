//! Application configuration constants
//!
//! Central location for limits, persisted key names, and endpoints
//! used throughout the application.

// ===== Application =====

/// Directory name under the platform data dir
pub const APP_NAME: &str = "WhisperZen";

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "WHISPERZEN_DATA_DIR";

/// Subdirectory of the data dir holding the key-value store
pub const STORE_DIR: &str = "store";

// ===== Ledger Limits =====

/// Maximum number of quotes kept in history
pub const MAX_HISTORY_COUNT: usize = 50;

/// Number of most recent history entries a new pick must not repeat
pub const RECENT_WINDOW: usize = 5;

// ===== Remote Quotes =====

/// Random quote endpoint returning `{content, author?}`
pub const REMOTE_QUOTE_URL: &str = "https://api.quotable.io/random";

/// User agent sent with remote quote requests
pub const HTTP_USER_AGENT: &str = "WhisperZen-Quotes";

// ===== Notifications =====

/// Title of every quote notification
pub const NOTIFICATION_TITLE: &str = "WhisperZen 🧘‍♀️";

/// Category identifier attached to quote notifications
pub const NOTIFICATION_CATEGORY_ID: &str = "QUOTE_CATEGORY";

/// Action identifier: add the notified quote to favorites
pub const FAVORITE_ACTION_ID: &str = "FAVORITE_ACTION";

/// Action identifier: advance to a new quote
pub const NEW_QUOTE_ACTION_ID: &str = "NEW_QUOTE_ACTION";

// ===== Persisted Keys =====

pub const KEY_CURRENT_QUOTE: &str = "currentQuote";
pub const KEY_FAVORITE_QUOTES: &str = "favoriteQuotes";
pub const KEY_QUOTE_HISTORY: &str = "quoteHistory";
/// Last string returned by the remote source
pub const KEY_LAST_QUOTE: &str = "lastQuote";

pub const KEY_SHOW_NOTIFICATIONS: &str = "showNotifications";
pub const KEY_NOTIFICATION_INTERVAL: &str = "notificationInterval";
pub const KEY_AUTO_CHANGE_QUOTE: &str = "autoChangeQuote";
pub const KEY_AUTO_CHANGE_INTERVAL: &str = "autoChangeInterval";
pub const KEY_PREFERRED_CATEGORIES: &str = "preferredCategories";
pub const KEY_USE_ONLINE_QUOTES: &str = "useOnlineQuotes";
pub const KEY_LAUNCH_AT_LOGIN: &str = "launchAtLogin";
pub const KEY_MENU_BAR_ICON: &str = "menuBarIcon";
pub const KEY_POPOVER_SIZE: &str = "popoverSize";
pub const KEY_SOUND_ENABLED: &str = "soundEnabled";
pub const KEY_APPEARANCE_MODE: &str = "appearanceMode";

// ===== Export =====

/// Separator placed between entries of the plain-text favorites export
pub const EXPORT_ENTRY_SEPARATOR: &str = "\n\n---\n\n";

/// Suggested file name for favorites exports (extension added per format)
pub const EXPORT_DEFAULT_FILENAME: &str = "WhisperZen_Favorites";
