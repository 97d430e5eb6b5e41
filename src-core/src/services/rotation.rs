//! Rotation controller
//!
//! Drives two independent repeating timers from the preferences:
//! auto-change commits a new quote on every tick, notifications deliver a
//! freshly picked quote without committing it. A timer is only torn down
//! and restarted when its own inputs change.

use crate::models::Preferences;
use crate::services::engine::QuoteEngine;
use crate::services::notifications::{NotificationSink, QuoteNotification};
use crate::services::preferences::PreferencesService;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// Future produced by one firing of a repeating job
pub type TickFuture = Pin<Box<dyn Future<Output = ()> + Send>>;

/// Job run on every firing
pub type TickJob = Arc<dyn Fn() -> TickFuture + Send + Sync>;

/// Runs jobs on a fixed period
pub trait Scheduler: Send + Sync {
    /// Run `job` every `every`, first firing one period from now
    fn schedule_repeating(&self, every: Duration, job: TickJob) -> JobHandle;
}

/// Stops its job when cancelled or dropped
pub struct JobHandle {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl JobHandle {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// Handle that aborts a spawned task
    pub fn from_task(task: JoinHandle<()>) -> Self {
        Self::new(move || task.abort())
    }

    pub fn cancel(mut self) {
        self.stop();
    }

    fn stop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl Drop for JobHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Scheduler backed by tokio time
#[derive(Debug, Default, Clone, Copy)]
pub struct IntervalScheduler;

impl Scheduler for IntervalScheduler {
    fn schedule_repeating(&self, every: Duration, job: TickJob) -> JobHandle {
        let task = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + every, every);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                job().await;
            }
        });

        JobHandle::from_task(task)
    }
}

/// Observable state of one timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Running(Duration),
}

impl From<Option<Duration>> for TimerState {
    fn from(period: Option<Duration>) -> Self {
        match period {
            Some(every) => TimerState::Running(every),
            None => TimerState::Stopped,
        }
    }
}

struct TimerSlot {
    name: &'static str,
    state: TimerState,
    handle: Option<JobHandle>,
}

impl TimerSlot {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            state: TimerState::Stopped,
            handle: None,
        }
    }

    /// Move to `desired`, restarting only when it differs from the current state
    fn reconcile(
        &mut self,
        desired: TimerState,
        scheduler: &dyn Scheduler,
        make_job: impl FnOnce(Duration) -> TickJob,
    ) {
        if desired == self.state {
            return;
        }

        self.stop();
        if let TimerState::Running(every) = desired {
            self.handle = Some(scheduler.schedule_repeating(every, make_job(every)));
            self.state = desired;
            tracing::info!("{} timer started ({:?})", self.name, every);
        }
    }

    fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.cancel();
            tracing::info!("{} timer stopped", self.name);
        }
        self.state = TimerState::Stopped;
    }
}

struct Timers {
    auto_change: TimerSlot,
    notifications: TimerSlot,
    permission_granted: bool,
    watcher: Option<JoinHandle<()>>,
}

/// Keeps the rotation timers in line with the preferences
pub struct RotationController {
    engine: QuoteEngine,
    preferences: PreferencesService,
    notifier: Arc<dyn NotificationSink>,
    scheduler: Arc<dyn Scheduler>,
    timers: Mutex<Timers>,
}

impl RotationController {
    pub fn new(
        engine: QuoteEngine,
        preferences: PreferencesService,
        notifier: Arc<dyn NotificationSink>,
        scheduler: Arc<dyn Scheduler>,
    ) -> Self {
        Self {
            engine,
            preferences,
            notifier,
            scheduler,
            timers: Mutex::new(Timers {
                auto_change: TimerSlot::new("Auto-change"),
                notifications: TimerSlot::new("Notification"),
                permission_granted: false,
                watcher: None,
            }),
        }
    }

    /// Apply the current preferences and follow every later change
    pub async fn start(self: &Arc<Self>) {
        let mut rx = self.preferences.subscribe();
        let current = rx.borrow_and_update().clone();
        self.apply(&current).await;

        let controller = Arc::clone(self);
        let watcher = tokio::spawn(async move {
            while rx.changed().await.is_ok() {
                let preferences = rx.borrow_and_update().clone();
                controller.apply(&preferences).await;
            }
            tracing::debug!("Preferences channel closed, rotation watcher exiting");
        });

        let mut timers = self.timers.lock().await;
        if let Some(previous) = timers.watcher.replace(watcher) {
            previous.abort();
        }
        tracing::info!("Rotation controller started");
    }

    /// Reconcile both timers against `preferences`
    pub async fn apply(&self, preferences: &Preferences) {
        let mut timers = self.timers.lock().await;
        self.reconcile(&mut timers, preferences);
    }

    /// Record whether the user allowed notifications
    pub async fn set_notification_permission(&self, granted: bool) {
        let preferences = self.preferences.get();
        let mut timers = self.timers.lock().await;
        if timers.permission_granted != granted {
            tracing::info!("Notification permission granted: {}", granted);
        }
        timers.permission_granted = granted;
        self.reconcile(&mut timers, &preferences);
    }

    pub async fn auto_change_state(&self) -> TimerState {
        self.timers.lock().await.auto_change.state
    }

    pub async fn notification_state(&self) -> TimerState {
        self.timers.lock().await.notifications.state
    }

    /// Stop both timers and stop following preferences
    pub async fn shutdown(&self) {
        let mut timers = self.timers.lock().await;
        if let Some(watcher) = timers.watcher.take() {
            watcher.abort();
        }
        timers.auto_change.stop();
        timers.notifications.stop();

        if let Err(e) = self.notifier.cancel_all() {
            tracing::warn!("Failed to withdraw notifications: {}", e);
        }
        tracing::info!("Rotation controller shut down");
    }

    fn reconcile(&self, timers: &mut Timers, preferences: &Preferences) {
        let auto_change = TimerState::from(preferences.auto_change_period());
        timers
            .auto_change
            .reconcile(auto_change, self.scheduler.as_ref(), |_| self.auto_change_job());

        let notifications = if timers.permission_granted {
            TimerState::from(preferences.notification_period())
        } else {
            TimerState::Stopped
        };
        timers.notifications.reconcile(
            notifications,
            self.scheduler.as_ref(),
            |every| self.notification_job(every),
        );
    }

    fn auto_change_job(&self) -> TickJob {
        let engine = self.engine.clone();
        Arc::new(move || {
            let engine = engine.clone();
            Box::pin(async move {
                if let Err(e) = engine.advance().await {
                    tracing::error!("Auto-change failed: {}", e);
                }
            })
        })
    }

    fn notification_job(&self, every: Duration) -> TickJob {
        let engine = self.engine.clone();
        let preferences = self.preferences.clone();
        let notifier = Arc::clone(&self.notifier);
        Arc::new(move || {
            let engine = engine.clone();
            let preferences = preferences.clone();
            let notifier = Arc::clone(&notifier);
            Box::pin(async move {
                let quote = match engine.pick_next().await {
                    Ok(quote) => quote,
                    Err(e) => {
                        tracing::error!("Failed to pick a quote for notification: {}", e);
                        return;
                    }
                };

                let sound = preferences.get().sound_enabled;
                let notification = QuoteNotification::for_quote(&quote, sound, every);
                if let Err(e) = notifier.deliver(&notification) {
                    tracing::error!("Failed to deliver notification: {}", e);
                }
            })
        })
    }
}
