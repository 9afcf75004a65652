//! Observable outcome of a redirect.

/// State of a redirect resolution.
///
/// Starts as `Redirecting`. `Failed` is terminal. A successful resolution
/// leaves the page through navigation and has no state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RedirectOutcome {
    #[default]
    Redirecting,
    Failed(String),
}

impl RedirectOutcome {
    pub fn is_redirecting(&self) -> bool {
        matches!(self, Self::Redirecting)
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Redirecting => None,
            Self::Failed(message) => Some(message),
        }
    }
}
