//! Error types shared by the gateway port and the orchestration components.

use thiserror::Error;

/// Message shown when a failure carries no human-readable detail.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failure of a call against the shortener API, or of the local validation
/// guarding it.
///
/// `EmptyResult` covers nominally successful responses without a usable
/// payload; callers treat it exactly like a transport failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request failed with HTTP status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("Empty result: {0}")]
    EmptyResult(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn empty_result(message: impl Into<String>) -> Self {
        Self::EmptyResult(message.into())
    }

    pub fn status(status: u16, detail: Option<String>) -> Self {
        Self::Status { status, detail }
    }

    /// Human-readable detail carried by the failure payload, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Status { detail, .. } => detail.as_deref(),
            Self::Validation(message) | Self::EmptyResult(message) => Some(message),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Detail if present, otherwise [`GENERIC_ERROR_MESSAGE`].
    pub fn user_message(&self) -> String {
        self.detail()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(GENERIC_ERROR_MESSAGE)
            .to_string()
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Status { status: 404, .. })
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            Self::Status {
                status: status.as_u16(),
                detail: None,
            }
        } else {
            Self::Transport(e.to_string())
        }
    }
}
