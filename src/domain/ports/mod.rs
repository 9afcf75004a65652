//! Port traits implemented by the infrastructure layer.
//!
//! - [`ShortenerGateway`] - Remote shortener API
//! - [`Navigator`] - Location replacement
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod gateway;
pub mod navigator;

pub use gateway::ShortenerGateway;
pub use navigator::Navigator;

#[cfg(test)]
pub use gateway::MockShortenerGateway;
#[cfg(test)]
pub use navigator::MockNavigator;
