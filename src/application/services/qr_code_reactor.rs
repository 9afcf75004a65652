//! QR code that follows a target URL, last trigger wins.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

use crate::domain::entities::QrImage;
use crate::domain::ports::ShortenerGateway;

/// Snapshot of the QR code widget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrCodeState {
    pub target_url: Option<String>,
    pub qr_image: Option<QrImage>,
    /// A fetch for `target_url` is outstanding.
    pub pending: bool,
}

#[derive(Default)]
struct InFlightFetch {
    generation: u64,
    handle: Option<AbortHandle>,
}

struct Inner<G: ?Sized> {
    gateway: Arc<G>,
    state: watch::Sender<QrCodeState>,
    fetch: Mutex<InFlightFetch>,
}

impl<G: ?Sized> Inner<G> {
    fn fetch(&self) -> MutexGuard<'_, InFlightFetch> {
        self.fetch.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, generation: u64, url: &str, image: Option<QrImage>) {
        let mut fetch = self.fetch();
        if fetch.generation != generation {
            debug!(url, "Discarding QR code for a superseded URL");
            return;
        }
        fetch.handle = None;

        self.state.send_modify(|s| {
            if s.target_url.as_deref() == Some(url) {
                s.qr_image = image;
                s.pending = false;
            }
        });
    }
}

/// Re-fetches the QR code whenever the target URL changes.
///
/// Failures never surface: the image is simply cleared. A fetch is tagged
/// with the generation of the change that started it, and only the fetch of
/// the current generation may write the image.
pub struct QrCodeReactor<G: ShortenerGateway + ?Sized + 'static> {
    inner: Arc<Inner<G>>,
}

impl<G: ShortenerGateway + ?Sized + 'static> QrCodeReactor<G> {
    pub fn new(gateway: Arc<G>) -> Self {
        let (state, _) = watch::channel(QrCodeState::default());
        Self {
            inner: Arc::new(Inner {
                gateway,
                state,
                fetch: Mutex::new(InFlightFetch::default()),
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<QrCodeState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> QrCodeState {
        self.inner.state.borrow().clone()
    }

    pub fn qr_image(&self) -> Option<QrImage> {
        self.inner.state.borrow().qr_image.clone()
    }

    pub fn is_pending(&self) -> bool {
        self.inner.state.borrow().pending
    }

    /// Sets the URL the QR code encodes.
    ///
    /// Blank clears the image synchronously without a request. Setting the
    /// current value again is not a change. Must be called within a Tokio
    /// runtime.
    pub fn set_target_url(&self, url: Option<String>) {
        let url = url
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let mut fetch = self.inner.fetch();
        let unchanged = self.inner.state.borrow().target_url == url;
        if unchanged {
            return;
        }

        fetch.generation += 1;
        let generation = fetch.generation;
        if let Some(previous) = fetch.handle.take() {
            previous.abort();
        }

        let Some(url) = url else {
            self.inner.state.send_modify(|s| {
                s.target_url = None;
                s.qr_image = None;
                s.pending = false;
            });
            return;
        };

        self.inner.state.send_modify(|s| {
            s.target_url = Some(url.clone());
            s.qr_image = None;
            s.pending = true;
        });

        let gateway = Arc::clone(&self.inner.gateway);
        let weak = Arc::downgrade(&self.inner);
        let task = tokio::spawn(async move {
            debug!(url = %url, "Fetching QR code");
            let image = match gateway.qr_code(&url).await {
                Ok(payload) => {
                    let image = QrImage::parse(payload);
                    if image.is_none() {
                        warn!(url = %url, "QR code response is empty or malformed");
                    }
                    image
                }
                Err(e) => {
                    warn!(url = %url, error = %e, "Failed to fetch QR code");
                    None
                }
            };

            if let Some(inner) = weak.upgrade() {
                inner.apply(generation, &url, image);
            }
        });
        fetch.handle = Some(task.abort_handle());
    }
}

impl<G: ShortenerGateway + ?Sized + 'static> Drop for QrCodeReactor<G> {
    fn drop(&mut self) {
        if let Some(handle) = self.inner.fetch().handle.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockShortenerGateway;
    use crate::error::GatewayError;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    async fn settled(reactor: &QrCodeReactor<MockShortenerGateway>) -> QrCodeState {
        let mut rx = reactor.subscribe();
        let state = rx.wait_for(|s| !s.pending).await.unwrap().clone();
        state
    }

    #[tokio::test]
    async fn test_fetches_image_for_new_url() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_qr_code()
            .withf(|url| url == "https://a.com")
            .times(1)
            .returning(|_| Ok(PNG.to_string()));
        let reactor = QrCodeReactor::new(Arc::new(mock));

        reactor.set_target_url(Some("https://a.com".to_string()));
        let state = settled(&reactor).await;

        assert_eq!(state.qr_image.as_ref().map(QrImage::as_str), Some(PNG));
        assert_eq!(state.target_url.as_deref(), Some("https://a.com"));
    }

    #[tokio::test]
    async fn test_empty_url_clears_without_request() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_qr_code().times(1).returning(|_| Ok(PNG.to_string()));
        let reactor = QrCodeReactor::new(Arc::new(mock));
        reactor.set_target_url(Some("https://a.com".to_string()));
        settled(&reactor).await;

        reactor.set_target_url(Some("  ".to_string()));

        let state = reactor.state();
        assert_eq!(state, QrCodeState::default());
    }

    #[tokio::test]
    async fn test_failure_is_absorbed() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_qr_code()
            .returning(|_| Err(GatewayError::status(404, Some("Not Found".to_string()))));
        let reactor = QrCodeReactor::new(Arc::new(mock));

        reactor.set_target_url(Some("https://a.com".to_string()));
        let state = settled(&reactor).await;

        assert_eq!(state.qr_image, None);
        assert_eq!(state.target_url.as_deref(), Some("https://a.com"));
    }

    #[tokio::test]
    async fn test_malformed_payload_clears_image() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_qr_code().returning(|_| Ok("data:image/png;base64,".to_string()));
        let reactor = QrCodeReactor::new(Arc::new(mock));

        reactor.set_target_url(Some("https://a.com".to_string()));

        assert_eq!(settled(&reactor).await.qr_image, None);
    }

    #[tokio::test]
    async fn test_same_url_is_not_a_change() {
        let mut mock = MockShortenerGateway::new();
        mock.expect_qr_code().times(1).returning(|_| Ok(PNG.to_string()));
        let reactor = QrCodeReactor::new(Arc::new(mock));

        reactor.set_target_url(Some("https://a.com".to_string()));
        settled(&reactor).await;
        reactor.set_target_url(Some("https://a.com ".to_string()));

        assert!(!reactor.is_pending());
        assert!(reactor.qr_image().is_some());
    }
}
