//! Statistics availability probe, foreground load and quiet background refresh.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::domain::entities::{self, ClickStats, DetailedStats};
use crate::domain::ports::ShortenerGateway;
use crate::error::GatewayError;

/// Period of the quiet background refresh.
pub const STATS_REFRESH_INTERVAL: Duration = Duration::from_millis(1000);

/// Result of the one-time availability probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsAvailability {
    #[default]
    Unchecked,
    Unavailable,
    Available,
}

/// Snapshot of the statistics dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsState {
    pub availability: StatsAvailability,
    /// True only during a foreground load.
    pub loading: bool,
    pub stats: Vec<ClickStats>,
}

impl StatsState {
    pub fn total_urls(&self) -> usize {
        entities::total_urls(&self.stats)
    }

    pub fn total_clicks(&self) -> u64 {
        entities::total_clicks(&self.stats)
    }

    pub fn most_popular(&self) -> Option<&ClickStats> {
        entities::most_popular(&self.stats)
    }
}

struct Inner<G: ?Sized> {
    gateway: Arc<G>,
    state: watch::Sender<StatsState>,
    /// Held for the duration of any load so loads never overlap.
    load_lock: tokio::sync::Mutex<()>,
}

struct LoadingGuard<'a> {
    state: &'a watch::Sender<StatsState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.loading = false);
    }
}

impl<G: ShortenerGateway + ?Sized> Inner<G> {
    fn is_available(&self) -> bool {
        self.state.borrow().availability == StatsAvailability::Available
    }

    async fn load(&self) {
        let _lock = self.load_lock.lock().await;
        self.state.send_modify(|s| s.loading = true);
        let _loading = LoadingGuard { state: &self.state };

        match self.gateway.stats_list().await {
            Ok(stats) => {
                debug!(count = stats.len(), "Loaded statistics");
                self.state.send_modify(|s| s.stats = stats);
            }
            Err(e) => error!(error = %e, "Error loading statistics"),
        }
    }

    async fn load_quietly(&self) {
        let Ok(_lock) = self.load_lock.try_lock() else {
            debug!("Statistics load still running, skipping refresh");
            return;
        };

        match self.gateway.stats_list().await {
            Ok(stats) => self.state.send_modify(|s| s.stats = stats),
            Err(e) => debug!(error = %e, "Quiet stats refresh failed"),
        }
    }
}

/// Owns the statistics snapshot and its refresh loop.
///
/// `start_polling` probes the endpoint once. When available it performs a
/// foreground load and then refreshes quietly every second until
/// `stop_polling` or drop. Loads never overlap: a tick that finds a load
/// still running is skipped.
pub struct StatsPoller<G: ShortenerGateway + ?Sized + 'static> {
    inner: Arc<Inner<G>>,
    started: AtomicBool,
    stopped: AtomicBool,
    poll_task: Mutex<Option<JoinHandle<()>>>,
}

impl<G: ShortenerGateway + ?Sized + 'static> StatsPoller<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(StatsState::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                state,
                load_lock: tokio::sync::Mutex::new(()),
            }),
            started: AtomicBool::new(false),
            stopped: AtomicBool::new(false),
            poll_task: Mutex::new(None),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<StatsState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> StatsState {
        self.inner.state.borrow().clone()
    }

    pub fn availability(&self) -> StatsAvailability {
        self.inner.state.borrow().availability
    }

    pub fn is_available(&self) -> bool {
        self.inner.is_available()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().loading
    }

    pub fn stats(&self) -> Vec<ClickStats> {
        self.inner.state.borrow().stats.clone()
    }

    pub fn total_urls(&self) -> usize {
        self.inner.state.borrow().total_urls()
    }

    pub fn total_clicks(&self) -> u64 {
        self.inner.state.borrow().total_clicks()
    }

    pub fn most_popular(&self) -> Option<ClickStats> {
        self.inner.state.borrow().most_popular().cloned()
    }

    /// Whether the background refresh task is running.
    pub fn is_polling(&self) -> bool {
        self.poll_task()
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Probes availability, loads once and starts the background refresh.
    ///
    /// Only the first call does anything. Must be called within a Tokio runtime.
    pub async fn start_polling(&self) {
        if self.started.swap(true, Ordering::SeqCst) {
            debug!("Stats poller already started");
            return;
        }

        debug!("Checking stats feature availability...");
        let availability = match self.inner.gateway.stats_probe().await {
            Ok(()) => StatsAvailability::Available,
            Err(e) => {
                info!(error = %e, "Statistics feature not available or not implemented");
                StatsAvailability::Unavailable
            }
        };
        self.inner
            .state
            .send_modify(|s| s.availability = availability);

        if availability != StatsAvailability::Available {
            return;
        }

        self.inner.load().await;
        self.spawn_refresh_loop();
    }

    /// Stops the background refresh. Safe to call any number of times.
    pub fn stop_polling(&self) {
        self.stopped.store(true, Ordering::SeqCst);
        if let Some(handle) = self.poll_task().take() {
            handle.abort();
            info!("Stopped auto-refresh for statistics");
        }
    }

    /// Foreground load: toggles `loading` and logs failures as errors.
    pub async fn refresh(&self) {
        self.inner.load().await;
    }

    /// Background load: no `loading` flag, failures only logged at debug,
    /// skipped if another load is running.
    pub async fn refresh_quietly(&self) {
        if self.inner.is_available() {
            self.inner.load_quietly().await;
        }
    }

    /// Detailed statistics for one short code, fetched on demand.
    ///
    /// # Errors
    ///
    /// Propagates the gateway failure; this is a user-initiated lookup.
    pub async fn stats_for(&self, short_code: &str) -> Result<DetailedStats, GatewayError> {
        self.inner.gateway.stats_detail(short_code).await
    }

    fn spawn_refresh_loop(&self) {
        let mut slot = self.poll_task();
        if self.stopped.load(Ordering::SeqCst) {
            debug!("Stats poller stopped before the refresh loop started");
            return;
        }

        let weak = Arc::downgrade(&self.inner);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(
                Instant::now() + STATS_REFRESH_INTERVAL,
                STATS_REFRESH_INTERVAL,
            );
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                let Some(inner) = weak.upgrade() else {
                    break;
                };
                if inner.is_available() {
                    inner.load_quietly().await;
                }
            }
        });

        *slot = Some(handle);
        info!("Started auto-refresh for statistics");
    }

    fn poll_task(&self) -> MutexGuard<'_, Option<JoinHandle<()>>> {
        self.poll_task
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<G: ShortenerGateway + ?Sized + 'static> Drop for StatsPoller<G> {
    fn drop(&mut self) {
        self.stop_polling();
    }
}
