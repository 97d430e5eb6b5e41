//! Services module
//!
//! Quote selection, ledger, preferences and the timers that drive them.

pub mod engine;
pub mod export;
pub mod ledger;
pub mod notifications;
pub mod preferences;
pub mod remote;
pub mod rotation;
pub mod selection;

pub use engine::{EngineSnapshot, QuoteEngine};
pub use export::ExportFormat;
pub use ledger::Ledger;
pub use notifications::{LogNotifier, NotificationAction, NotificationSink, QuoteNotification};
pub use preferences::PreferencesService;
pub use remote::{CachingQuoteSource, HttpQuoteSource, QuoteSource};
pub use rotation::{IntervalScheduler, JobHandle, RotationController, Scheduler, TimerState};
