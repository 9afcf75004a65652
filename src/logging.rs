//! Tracing subscriber setup for the binary.

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;

/// Installs the global subscriber.
///
/// `RUST_LOG` wins over `config.log_level`; `config.log_format` selects
/// `json` or human-readable `text` output. Logs go to stderr so command
/// output on stdout stays clean.
///
/// # Errors
///
/// Returns an error if the level is not a valid filter or a subscriber is
/// already installed.
pub fn init_tracing(config: &Config) -> Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.log_level)
            .with_context(|| format!("Invalid log level: {}", config.log_level))?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    if config.log_format == "json" {
        Registry::default()
            .with(env_filter)
            .with(fmt_layer.json().with_current_span(false))
            .try_init()
            .context("Failed to install tracing subscriber")?;
    } else {
        Registry::default()
            .with(env_filter)
            .with(fmt_layer.with_ansi(true))
            .try_init()
            .context("Failed to install tracing subscriber")?;
    }

    Ok(())
}
