//! # URL Shortener Client
//!
//! Client core for a URL shortening service: the request orchestration that
//! sits between a user interface and the shortener HTTP API.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities and the port traits components depend on
//! - **Application Layer** ([`application`]) - Reactive components a UI binds to
//! - **Infrastructure Layer** ([`infrastructure`]) - `reqwest` gateway and terminal navigator
//!
//! ## Features
//!
//! - Single-flight shortening with a self-clearing status message
//! - QR code that follows the entered URL, stale responses discarded
//! - Short code resolution with scheme normalization and a delayed redirect
//! - Statistics availability probe and quiet periodic refresh
//!
//! ## Quick Start
//!
//! ```bash
//! export SHORTENER_API_URL="http://localhost:8000"
//!
//! cargo run -- shorten example.com
//! cargo run -- stats --watch
//! ```
//!
//! ## Configuration
//!
//! Client configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod state;
pub mod utils;

pub use error::GatewayError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        QrCodeReactor, QrCodeState, RedirectResolver, ShortenOrchestrator, ShortenState,
        ShortenerPage, StatsAvailability, StatsPoller, StatsState,
    };
    pub use crate::domain::entities::{
        ClickStats, DetailedStats, QrImage, RedirectOutcome, ShortenOutcome, ShortenResult,
        ShortenStatus,
    };
    pub use crate::domain::ports::{Navigator, ShortenerGateway};
    pub use crate::error::GatewayError;
    pub use crate::infrastructure::{HttpGateway, StdoutNavigator};
    pub use crate::state::AppState;
}
