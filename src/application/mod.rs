//! Application layer: the reactive components a UI binds to.
//!
//! Every component owns its state in a `tokio::sync::watch` channel; UIs read
//! snapshots or subscribe, and only the component itself writes.
//!
//! # Available Components
//!
//! - [`services::ShortenOrchestrator`] - Single-flight shortening with a self-clearing status
//! - [`services::QrCodeReactor`] - QR code that follows a target URL, last trigger wins
//! - [`services::RedirectResolver`] - Lookup, normalize, pause, navigate
//! - [`services::StatsPoller`] - Availability probe and quiet periodic refresh
//! - [`services::ShortenerPage`] - Home page composition of the above

pub mod services;
