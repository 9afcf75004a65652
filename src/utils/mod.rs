//! Utility functions for URL processing and display formatting.
//!
//! - [`url_normalizer`] - Scheme normalization of redirect targets
//! - [`display`] - Truncation, short link composition, date formatting

pub mod display;
pub mod url_normalizer;
