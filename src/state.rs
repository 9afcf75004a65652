//! Shared application state and component factories.

use std::sync::Arc;

use crate::application::services::{
    QrCodeReactor, RedirectResolver, ShortenOrchestrator, ShortenerPage, StatsPoller,
};
use crate::config::Config;
use crate::domain::ports::{Navigator, ShortenerGateway};
use crate::error::GatewayError;
use crate::infrastructure::HttpGateway;

/// Gateway and public origin shared by every component.
///
/// Components are created per view; the gateway is shared.
pub struct AppState<G: ShortenerGateway + ?Sized + 'static = dyn ShortenerGateway> {
    pub gateway: Arc<G>,
    pub public_base_url: String,
}

impl<G: ShortenerGateway + ?Sized + 'static> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            public_base_url: self.public_base_url.clone(),
        }
    }
}

impl AppState {
    /// Builds the state around an [`HttpGateway`] from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API base URL is rejected by the gateway.
    pub fn from_config(config: &Config) -> Result<Self, GatewayError> {
        let gateway: Arc<dyn ShortenerGateway> = Arc::new(HttpGateway::from_config(config)?);
        Ok(Self::new(gateway, config.public_base_url.clone()))
    }
}

impl<G: ShortenerGateway + ?Sized + 'static> AppState<G> {
    pub fn new(gateway: Arc<G>, public_base_url: impl Into<String>) -> Self {
        Self {
            gateway,
            public_base_url: public_base_url.into(),
        }
    }

    pub fn shortener_page(&self) -> ShortenerPage<G> {
        ShortenerPage::new(Arc::clone(&self.gateway), self.public_base_url.clone())
    }

    pub fn shorten_orchestrator(&self) -> ShortenOrchestrator<G> {
        ShortenOrchestrator::new(Arc::clone(&self.gateway))
    }

    pub fn qr_code_reactor(&self) -> QrCodeReactor<G> {
        QrCodeReactor::new(Arc::clone(&self.gateway))
    }

    pub fn stats_poller(&self) -> StatsPoller<G> {
        StatsPoller::new(Arc::clone(&self.gateway))
    }

    /// Resolver for one redirect route activation; "home" is the public origin.
    pub fn redirect_resolver<N: Navigator + ?Sized>(
        &self,
        navigator: Arc<N>,
    ) -> RedirectResolver<G, N> {
        RedirectResolver::new(
            Arc::clone(&self.gateway),
            navigator,
            self.public_base_url.clone(),
        )
    }
}
