//! `reqwest`-backed implementation of [`ShortenerGateway`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use url::Url;

use super::dto::{ErrorBody, LongUrlResponse, QrCodeResponse, ShortenRequest, ShortenResponse};
use crate::config::Config;
use crate::domain::entities::{ClickStats, DetailedStats};
use crate::domain::ports::ShortenerGateway;
use crate::error::GatewayError;

/// HTTP client for the shortener API.
///
/// Endpoints are resolved under `base_url`; path parameters are
/// percent-encoded as single segments. No retries: the transport timeout is
/// the only deadline.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Creates a gateway for the API rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if `base_url` is not a valid
    /// http(s) base URL, [`GatewayError::Transport`] if the client cannot be
    /// built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GatewayError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GatewayError::validation(format!("Invalid API base URL: {e}")))?;

        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(GatewayError::validation(format!(
                "API base URL must be an http(s) URL, got '{base_url}'"
            )));
        }

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::Transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Creates a gateway from the loaded configuration.
    ///
    /// # Errors
    ///
    /// See [`Self::new`].
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        Self::new(
            &config.api_base_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, GatewayError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = ErrorBody::detail_from(&body);
        warn!(status = status.as_u16(), detail = ?detail, "Request failed with HTTP error");
        Err(GatewayError::status(status.as_u16(), detail))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, GatewayError> {
        let bytes = self.send(request).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| GatewayError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ShortenerGateway for HttpGateway {
    async fn shorten(&self, url: &str) -> Result<String, GatewayError> {
        let endpoint = self.endpoint(&["shorten"]);
        info!(endpoint = %endpoint, url, "Sending POST request");

        let response: ShortenResponse = self
            .send_json(self.client.post(endpoint).json(&ShortenRequest { url }))
            .await?;

        info!("Request succeeded");
        Ok(response.into_short_code())
    }

    async fn resolve(&self, short_code: &str) -> Result<String, GatewayError> {
        let endpoint = self.endpoint(&[short_code]);
        debug!(endpoint = %endpoint, "Fetching long URL");

        let response: LongUrlResponse = self.send_json(self.client.get(endpoint)).await?;
        Ok(response.into_long_url())
    }

    async fn qr_code(&self, url: &str) -> Result<String, GatewayError> {
        let endpoint = self.endpoint(&["get-qr-code", url]);
        debug!(endpoint = %endpoint, "Fetching QR code");

        let response: QrCodeResponse = self.send_json(self.client.get(endpoint)).await?;
        response
            .image_base64
            .filter(|payload| !payload.trim().is_empty())
            .ok_or_else(|| GatewayError::empty_result("The returned QR code is empty"))
    }

    async fn stats_probe(&self) -> Result<(), GatewayError> {
        let endpoint = self.endpoint(&["stats"]);
        self.send(self.client.get(endpoint)).await?;
        Ok(())
    }

    async fn stats_list(&self) -> Result<Vec<ClickStats>, GatewayError> {
        let stats: Vec<ClickStats> = self
            .send_json(self.client.get(self.endpoint(&["stats"])))
            .await?;
        debug!(count = stats.len(), "Retrieved statistics for all URLs");
        Ok(stats)
    }

    async fn stats_detail(&self, short_code: &str) -> Result<DetailedStats, GatewayError> {
        let stats = self
            .send_json(self.client.get(self.endpoint(&["stats", short_code])))
            .await?;
        debug!(short_code, "Retrieved statistics for short code");
        Ok(stats)
    }
}
