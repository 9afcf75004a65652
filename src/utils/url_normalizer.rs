//! URL scheme normalization for redirect targets and display links.

use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static HTTP_SCHEME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^https?://").unwrap());

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error)]
pub enum UrlNormalizationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),
}

/// Prefixes `https://` unless the URL already starts with `http://` or `https://`.
///
/// The rest of the string is left untouched.
///
/// ```
/// use url_shortener_client::utils::url_normalizer::ensure_scheme;
///
/// assert_eq!(ensure_scheme("example.com/x"), "https://example.com/x");
/// assert_eq!(ensure_scheme("http://example.com"), "http://example.com");
/// ```
pub fn ensure_scheme(url: &str) -> String {
    let url = url.trim();
    if HTTP_SCHEME_REGEX.is_match(url) {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Applies [`ensure_scheme`] and checks the result is an absolute URL with a host.
///
/// Returns the normalized string, not the re-serialized [`Url`], so
/// `example.com` becomes `https://example.com` without a trailing slash.
///
/// # Errors
///
/// Returns [`UrlNormalizationError::Empty`] for blank input and
/// [`UrlNormalizationError::InvalidFormat`] when the result does not parse.
pub fn normalize_redirect_target(url: &str) -> Result<String, UrlNormalizationError> {
    if url.trim().is_empty() {
        return Err(UrlNormalizationError::Empty);
    }

    let normalized = ensure_scheme(url);
    let parsed =
        Url::parse(&normalized).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(UrlNormalizationError::InvalidFormat(
            "missing host".to_string(),
        ));
    }

    Ok(normalized)
}
