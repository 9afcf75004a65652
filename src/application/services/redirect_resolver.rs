//! Short code resolution followed by a delayed navigation.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::{error, info, warn};

use crate::domain::entities::RedirectOutcome;
use crate::domain::ports::{Navigator, ShortenerGateway};
use crate::error::GatewayError;
use crate::utils::url_normalizer::normalize_redirect_target;

/// Pause between a successful lookup and the navigation.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(5000);

const INVALID_SHORT_URL: &str = "Invalid short URL";

/// Resolves one short code and navigates to its destination.
///
/// Sequence: lookup, scheme normalization, a fixed 5000 ms pause, then
/// navigation. Any lookup or normalization error ends in a terminal
/// [`RedirectOutcome::Failed`] and the pause never runs. An instance serves
/// a single route activation; later `resolve` calls are ignored.
pub struct RedirectResolver<G: ShortenerGateway + ?Sized, N: Navigator + ?Sized> {
    gateway: Arc<G>,
    navigator: Arc<N>,
    home_url: String,
    state: watch::Sender<RedirectOutcome>,
    started: AtomicBool,
}

impl<G: ShortenerGateway + ?Sized, N: Navigator + ?Sized> RedirectResolver<G, N> {
    pub fn new(gateway: Arc<G>, navigator: Arc<N>, home_url: impl Into<String>) -> Self {
        let (state, _) = watch::channel(RedirectOutcome::Redirecting);
        Self {
            gateway,
            navigator,
            home_url: home_url.into(),
            state,
            started: AtomicBool::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RedirectOutcome> {
        self.state.subscribe()
    }

    pub fn outcome(&self) -> RedirectOutcome {
        self.state.borrow().clone()
    }

    pub async fn resolve(&self, short_code: &str) {
        if self.started.swap(true, Ordering::SeqCst) {
            warn!(short_code, "Redirect already resolved by this instance, ignoring");
            return;
        }

        let short_code = short_code.trim();
        if short_code.is_empty() {
            self.fail(INVALID_SHORT_URL.to_string());
            return;
        }

        let target = match self.lookup(short_code).await {
            Ok(target) => target,
            Err(e) => {
                error!(short_code, error = %e, "Failed to fetch long URL");
                let message = match e.detail() {
                    Some(detail) => format!(
                        "Short URL not found or invalid long URL for code '{short_code}': {detail}"
                    ),
                    None => {
                        format!("Short URL not found or invalid long URL for code '{short_code}'")
                    }
                };
                self.fail(message);
                return;
            }
        };

        info!(short_code, target = %target, "Redirecting in {} ms", REDIRECT_DELAY.as_millis());
        tokio::time::sleep(REDIRECT_DELAY).await;
        self.navigator.navigate(&target);
    }

    /// Navigates back to the application's home page.
    pub fn go_home(&self) {
        self.navigator.navigate(&self.home_url);
    }

    async fn lookup(&self, short_code: &str) -> Result<String, GatewayError> {
        let long_url = self.gateway.resolve(short_code).await?;
        if long_url.trim().is_empty() {
            return Err(GatewayError::empty_result(
                "No long URL for short code found",
            ));
        }
        info!(short_code, long_url = %long_url, "Long URL retrieved");

        normalize_redirect_target(&long_url).map_err(|e| GatewayError::validation(e.to_string()))
    }

    fn fail(&self, message: String) {
        self.state.send_modify(|outcome| {
            if outcome.is_redirecting() {
                *outcome = RedirectOutcome::Failed(message);
            }
        });
    }
}
