//! Terminal stand-in for the browser location.

use colored::Colorize;
use tracing::info;

use crate::domain::ports::Navigator;

/// Prints the navigation target instead of changing a page location.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutNavigator;

impl StdoutNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl Navigator for StdoutNavigator {
    fn navigate(&self, url: &str) {
        info!(url, "Navigating");
        println!("{} {}", "→".bright_green().bold(), url.bright_cyan().underline());
    }
}
