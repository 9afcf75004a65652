//! Port trait for the remote shortener API.

use crate::domain::entities::{ClickStats, DetailedStats};
use crate::error::GatewayError;
use async_trait::async_trait;

/// Contract the orchestration components depend on.
///
/// Implementations return the raw payloads; emptiness checks and the
/// surfacing policy belong to the callers.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpGateway`] - `reqwest`-backed client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerGateway: Send + Sync {
    /// Shortens `url` and returns the issued short code.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Status`] with the backend's `detail` on a
    /// non-2xx response, [`GatewayError::Transport`] on network failure.
    async fn shorten(&self, url: &str) -> Result<String, GatewayError>;

    /// Looks up the long URL behind `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Status`] with status 404 for unknown codes.
    async fn resolve(&self, short_code: &str) -> Result<String, GatewayError>;

    /// Fetches the QR encoding of `url` as a base64 payload.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::EmptyResult`] when the response lacks the
    /// image field.
    async fn qr_code(&self, url: &str) -> Result<String, GatewayError>;

    /// Lightweight availability check of the statistics endpoint.
    async fn stats_probe(&self) -> Result<(), GatewayError>;

    /// Lists statistics for every short link.
    async fn stats_list(&self) -> Result<Vec<ClickStats>, GatewayError>;

    /// Detailed statistics for a single short link.
    async fn stats_detail(&self, short_code: &str) -> Result<DetailedStats, GatewayError>;
}
