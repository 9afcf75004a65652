//! Client-side entities mirrored from the shortener API and the UI state.
//!
//! # Entity Types
//!
//! - [`ShortenStatus`], [`ShortenResult`], [`ShortenOutcome`] - Shortening flow
//! - [`RedirectOutcome`] - Redirect flow
//! - [`ClickStats`], [`DetailedStats`] - Statistics, with the pure aggregates
//!   [`total_urls`], [`total_clicks`] and [`most_popular`]
//! - [`QrImage`] - Validated QR code payload

pub mod click_stats;
pub mod qr_image;
pub mod redirect;
pub mod shorten;

pub use click_stats::{ClickStats, DetailedStats, most_popular, total_clicks, total_urls};
pub use qr_image::QrImage;
pub use redirect::RedirectOutcome;
pub use shorten::{ShortenOutcome, ShortenResult, ShortenStatus};
