//! Stateful client components.

pub mod qr_code_reactor;
pub mod redirect_resolver;
pub mod shorten_orchestrator;
pub mod shortener_page;
pub mod stats_poller;

pub use qr_code_reactor::{QrCodeReactor, QrCodeState};
pub use redirect_resolver::RedirectResolver;
pub use shorten_orchestrator::{ShortenOrchestrator, ShortenState};
pub use shortener_page::ShortenerPage;
pub use stats_poller::{StatsAvailability, StatsPoller, StatsState};
