//! Port trait for the navigation side effect.

/// Replaces the current location with a URL.
///
/// Navigation leaves the page, so nothing is reported back.
#[cfg_attr(test, mockall::automock)]
pub trait Navigator: Send + Sync {
    fn navigate(&self, url: &str);
}
