//! Infrastructure layer for external integrations.
//!
//! This layer implements the ports defined by the domain layer.
//!
//! # Modules
//!
//! - [`http`] - `reqwest` gateway for the shortener API
//! - [`navigation`] - Terminal navigator used by the CLI

pub mod http;
pub mod navigation;

pub use http::HttpGateway;
pub use navigation::StdoutNavigator;
