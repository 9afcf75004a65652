//! Single-flight URL shortening with a self-clearing status.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, error, info, warn};

use crate::domain::entities::{ShortenOutcome, ShortenResult, ShortenStatus};
use crate::domain::ports::ShortenerGateway;
use crate::error::GatewayError;

/// How long a status stays visible before it clears itself.
pub const STATUS_DISPLAY_DURATION: Duration = Duration::from_millis(3000);

/// Snapshot of the shortening form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShortenState {
    pub url: Option<String>,
    pub in_progress: bool,
    pub status: Option<ShortenStatus>,
    pub result: Option<ShortenResult>,
    pub error_message: Option<String>,
}

impl ShortenState {
    /// Message for the current status, if any.
    pub fn status_message(&self) -> Option<String> {
        self.status
            .map(|status| status.message(self.error_message.as_deref()))
    }
}

#[derive(Default)]
struct StatusTimer {
    generation: u64,
    handle: Option<AbortHandle>,
}

struct Inner<G: ?Sized> {
    gateway: Arc<G>,
    state: watch::Sender<ShortenState>,
    status_timer: Mutex<StatusTimer>,
}

impl<G: ?Sized> Inner<G> {
    fn status_timer(&self) -> MutexGuard<'_, StatusTimer> {
        self.status_timer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Clears the status if no newer transition happened since `generation` was armed.
    fn clear_status(&self, generation: u64) {
        let mut timer = self.status_timer();
        if timer.generation != generation {
            debug!(generation, current = timer.generation, "Ignoring stale status timer");
            return;
        }

        timer.handle = None;
        self.state.send_modify(|s| s.status = None);
    }
}

/// Resets the in-progress flag on every exit path, including cancellation.
struct InFlightGuard<'a> {
    state: &'a watch::Sender<ShortenState>,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.state.send_modify(|s| s.in_progress = false);
    }
}

enum Claim {
    Busy,
    Missing,
    Granted(String),
}

/// Owns the shortening form state and guarantees at most one request in flight.
///
/// A trigger while a request is outstanding is dropped, not queued. Every
/// status transition arms its own 3000 ms clear timer; a newer transition
/// invalidates the older timer.
pub struct ShortenOrchestrator<G: ShortenerGateway + ?Sized + 'static> {
    inner: Arc<Inner<G>>,
}

impl<G: ShortenerGateway + ?Sized + 'static> ShortenOrchestrator<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(ShortenState::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                state,
                status_timer: Mutex::new(StatusTimer::default()),
            }),
        }
    }

    /// Replaces the entered URL.
    pub fn set_url(&self, url: Option<String>) {
        self.inner.state.send_if_modified(|s| {
            if s.url == url {
                return false;
            }
            s.url = url;
            true
        });
    }

    pub fn subscribe(&self) -> watch::Receiver<ShortenState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> ShortenState {
        self.inner.state.borrow().clone()
    }

    pub fn url(&self) -> Option<String> {
        self.inner.state.borrow().url.clone()
    }

    pub fn is_in_progress(&self) -> bool {
        self.inner.state.borrow().in_progress
    }

    pub fn status(&self) -> Option<ShortenStatus> {
        self.inner.state.borrow().status
    }

    pub fn result(&self) -> Option<ShortenResult> {
        self.inner.state.borrow().result.clone()
    }

    pub fn error_message(&self) -> Option<String> {
        self.inner.state.borrow().error_message.clone()
    }

    /// Shortens the entered URL.
    ///
    /// Returns [`ShortenOutcome::Dropped`] without touching any state when a
    /// request is already in flight, and [`ShortenOutcome::MissingUrl`]
    /// without contacting the gateway when the URL is blank.
    ///
    /// Must be called within a Tokio runtime: status transitions spawn their
    /// clear timer.
    pub async fn request_shorten(&self) -> ShortenOutcome {
        let mut claim = Claim::Busy;
        self.inner.state.send_if_modified(|s| {
            if s.in_progress {
                return false;
            }

            s.result = None;
            s.error_message = None;
            match s.url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
                Some(url) => {
                    claim = Claim::Granted(url.to_string());
                    s.in_progress = true;
                }
                None => claim = Claim::Missing,
            }
            true
        });

        let url = match claim {
            Claim::Busy => {
                info!("Shortening URL is already in progress. Not starting another request.");
                return ShortenOutcome::Dropped;
            }
            Claim::Missing => {
                warn!("URL is empty");
                self.transition(ShortenStatus::MissingUrl, |_| {});
                return ShortenOutcome::MissingUrl;
            }
            Claim::Granted(url) => url,
        };

        let _guard = InFlightGuard {
            state: &self.inner.state,
        };

        debug!(url = %url, "Sending shorten request");
        let response = self.inner.gateway.shorten(&url).await.and_then(|code| {
            let code = code.trim();
            if code.is_empty() {
                Err(GatewayError::empty_result("The returned short path is empty"))
            } else {
                Ok(code.to_string())
            }
        });

        match response {
            Ok(code) => {
                info!(url = %url, short_code = %code, "URL shortened");
                let result = ShortenResult::new(code);
                let stored = result.clone();
                self.transition(ShortenStatus::RequestSuccess, move |s| {
                    s.result = Some(stored);
                    s.url = None;
                });
                ShortenOutcome::Shortened(result)
            }
            Err(e) => {
                error!(url = %url, error = %e, "Failed to shorten URL");
                let message = e.user_message();
                let stored = message.clone();
                self.transition(ShortenStatus::RequestFailure, move |s| {
                    s.error_message = Some(stored);
                });
                ShortenOutcome::Failed(message)
            }
        }
    }

    /// Publishes `status` together with `apply` and re-arms the clear timer.
    fn transition(&self, status: ShortenStatus, apply: impl FnOnce(&mut ShortenState)) {
        let mut timer = self.inner.status_timer();
        timer.generation += 1;
        let generation = timer.generation;

        if let Some(previous) = timer.handle.take() {
            previous.abort();
        }

        self.inner.state.send_modify(|s| {
            apply(s);
            s.status = Some(status);
        });

        let weak = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            tokio::time::sleep(STATUS_DISPLAY_DURATION).await;
            if let Some(inner) = weak.upgrade() {
                inner.clear_status(generation);
            }
        });
        timer.handle = Some(task.abort_handle());
    }
}

impl<G: ShortenerGateway + ?Sized + 'static> Drop for ShortenOrchestrator<G> {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.status_timer().handle.take() {
            handle.abort();
        }
    }
}
