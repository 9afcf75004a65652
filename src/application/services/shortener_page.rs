//! Home page composition: shortening form, QR code and quick statistics.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::application::services::{QrCodeReactor, ShortenOrchestrator, StatsPoller};
use crate::domain::entities::ShortenOutcome;
use crate::domain::ports::ShortenerGateway;
use crate::utils::display::short_url;

/// Delay before the stats refresh that follows a successful shortening,
/// giving the backend time to record the new link.
pub const POST_SHORTEN_STATS_DELAY: Duration = Duration::from_millis(100);

/// Wires the home page components together.
///
/// The entered URL drives both the form and the QR code. The QR code keeps
/// showing the last entered URL after a successful shortening clears the form.
pub struct ShortenerPage<G: ShortenerGateway + ?Sized + 'static> {
    orchestrator: ShortenOrchestrator<G>,
    qr_code: QrCodeReactor<G>,
    stats: Arc<StatsPoller<G>>,
    public_base_url: String,
}

impl<G: ShortenerGateway + ?Sized + 'static> ShortenerPage<G> {
    pub fn new(gateway: Arc<G>, public_base_url: impl Into<String>) -> Self {
        Self {
            orchestrator: ShortenOrchestrator::new(Arc::clone(&gateway)),
            qr_code: QrCodeReactor::new(Arc::clone(&gateway)),
            stats: Arc::new(StatsPoller::new(gateway)),
            public_base_url: public_base_url.into(),
        }
    }

    pub fn orchestrator(&self) -> &ShortenOrchestrator<G> {
        &self.orchestrator
    }

    pub fn qr_code(&self) -> &QrCodeReactor<G> {
        &self.qr_code
    }

    pub fn stats(&self) -> &StatsPoller<G> {
        &self.stats
    }

    /// Starts the statistics lifecycle.
    pub async fn start(&self) {
        self.stats.start_polling().await;
    }

    /// Ends the statistics lifecycle.
    pub fn stop(&self) {
        self.stats.stop_polling();
    }

    /// Input handler for the URL field.
    pub fn set_url(&self, url: Option<String>) {
        self.orchestrator.set_url(url.clone());
        self.qr_code.set_target_url(url);
    }

    /// Shortens the entered URL and schedules a quiet stats refresh on success.
    pub async fn shorten(&self) -> ShortenOutcome {
        let outcome = self.orchestrator.request_shorten().await;

        if matches!(outcome, ShortenOutcome::Shortened(_)) && self.stats.is_available() {
            let stats = Arc::downgrade(&self.stats);
            tokio::spawn(async move {
                tokio::time::sleep(POST_SHORTEN_STATS_DELAY).await;
                if let Some(stats) = stats.upgrade() {
                    debug!("Refreshing statistics after shortening");
                    stats.refresh_quietly().await;
                }
            });
        }

        outcome
    }

    /// Full short link for `short_code`.
    pub fn short_url(&self, short_code: &str) -> String {
        short_url(&self.public_base_url, short_code)
    }

    /// Full short link of the latest successful shortening, if any.
    pub fn short_link(&self) -> Option<String> {
        self.orchestrator
            .result()
            .map(|result| self.short_url(&result.short_code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ClickStats;
    use crate::domain::ports::MockShortenerGateway;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn test_success_refreshes_stats_shortly_after() {
        let list_calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&list_calls);

        let mut mock = MockShortenerGateway::new();
        mock.expect_stats_probe().returning(|| Ok(()));
        mock.expect_stats_list().returning(move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            Ok(vec![ClickStats::new("abc", "example.com", n as u64, "2024-01-01")])
        });
        mock.expect_shorten().returning(|_| Ok("abc".to_string()));
        mock.expect_qr_code()
            .returning(|_| Ok("data:image/png;base64,iVBORw0KGgo=".to_string()));
        let page = ShortenerPage::new(Arc::new(mock), "https://s.example.com");

        page.start().await;
        assert_eq!(list_calls.load(Ordering::SeqCst), 1);

        page.set_url(Some("example.com".to_string()));
        let outcome = page.shorten().await;
        assert!(matches!(outcome, ShortenOutcome::Shortened(_)));

        sleep(Duration::from_millis(150)).await;
        assert_eq!(list_calls.load(Ordering::SeqCst), 2);

        assert_eq!(page.short_link().as_deref(), Some("https://s.example.com/abc"));
        assert_eq!(page.orchestrator().url(), None);
        assert_eq!(
            page.qr_code().state().target_url.as_deref(),
            Some("example.com")
        );
        page.stop();
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_stats_refresh_when_unavailable() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_stats_probe()
            .returning(|| Err(crate::error::GatewayError::status(404, None)));
        mock.expect_stats_list().never();
        mock.expect_shorten().returning(|_| Ok("abc".to_string()));
        mock.expect_qr_code()
            .returning(|_| Err(crate::error::GatewayError::status(404, None)));
        let page = ShortenerPage::new(Arc::new(mock), "https://s.example.com/");

        page.start().await;
        page.set_url(Some("example.com".to_string()));
        page.shorten().await;
        sleep(Duration::from_millis(500)).await;

        assert_eq!(page.short_url("xyz"), "https://s.example.com/xyz");
    }
}
