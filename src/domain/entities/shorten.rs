//! Shortening status, result and outcome types.

use std::fmt;

/// Transient status of the latest shortening attempt.
///
/// The "no status" state is `Option::<ShortenStatus>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortenStatus {
    MissingUrl,
    RequestSuccess,
    RequestFailure,
}

impl ShortenStatus {
    /// Message shown to the user for this status.
    ///
    /// `error_detail` is appended to failure messages only.
    pub fn message(self, error_detail: Option<&str>) -> String {
        match self {
            Self::MissingUrl => "Please enter an URL".to_string(),
            Self::RequestSuccess => "Successfully shortened URL".to_string(),
            Self::RequestFailure => match error_detail.filter(|d| !d.is_empty()) {
                Some(detail) => format!("Failed to shorten URL: {detail}"),
                None => "Failed to shorten URL".to_string(),
            },
        }
    }
}

impl fmt::Display for ShortenStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MissingUrl => "MISSING_URL",
            Self::RequestSuccess => "REQUEST_SUCCESS",
            Self::RequestFailure => "REQUEST_FAILURE",
        };
        f.write_str(name)
    }
}

/// Successful shortening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub short_code: String,
}

impl ShortenResult {
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }
}

/// What a single `request_shorten` call ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShortenOutcome {
    /// Another shortening was in flight; nothing happened.
    Dropped,
    /// The URL was empty; the gateway was not contacted.
    MissingUrl,
    Shortened(ShortenResult),
    /// The request failed; carries the message stored in the state.
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(ShortenStatus::MissingUrl.message(None), "Please enter an URL");
        assert_eq!(
            ShortenStatus::RequestSuccess.message(Some("ignored")),
            "Successfully shortened URL"
        );
        assert_eq!(
            ShortenStatus::RequestFailure.message(None),
            "Failed to shorten URL"
        );
        assert_eq!(
            ShortenStatus::RequestFailure.message(Some("URL was already shortened previously")),
            "Failed to shorten URL: URL was already shortened previously"
        );
    }

    #[test]
    fn test_status_display() {
        assert_eq!(ShortenStatus::RequestFailure.to_string(), "REQUEST_FAILURE");
    }
}
