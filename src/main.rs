//! Command-line front end for the URL shortener client.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when omitted), optionally saving its QR code
//! shortener shorten example.com --qr example.png
//!
//! # Resolve a short code and follow it after the redirect pause
//! shortener open abc123
//!
//! # Statistics table, one link's details, or a live view
//! shortener stats
//! shortener stats abc123
//! shortener stats --watch
//!
//! # Save the QR code of any URL
//! shortener qr https://example.com --out example.png
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use url_shortener_client::config::{self, Config};
use url_shortener_client::domain::entities::{ClickStats, QrImage, ShortenOutcome};
use url_shortener_client::domain::ports::ShortenerGateway;
use url_shortener_client::infrastructure::StdoutNavigator;
use url_shortener_client::logging;
use url_shortener_client::prelude::{AppState, QrCodeReactor, StatsPoller};
use url_shortener_client::utils::display::{format_created, truncate_url};

/// Client for a URL shortener API.
#[derive(Parser)]
#[command(name = "shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Shorten {
        /// URL to shorten (prompted for if omitted)
        url: Option<String>,

        /// Also save the QR code of the URL as a PNG file
        #[arg(long, value_name = "FILE")]
        qr: Option<PathBuf>,
    },

    /// Resolve a short code and follow it
    Open {
        /// Short code to resolve
        code: String,
    },

    /// Show click statistics
    Stats {
        /// Show details for a single short code
        code: Option<String>,

        /// Keep refreshing until Ctrl-C
        #[arg(short, long, conflicts_with = "code")]
        watch: bool,
    },

    /// Save the QR code of a URL as a PNG file
    Qr {
        /// URL to encode
        url: String,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    logging::init_tracing(&config)?;
    config.print_summary();

    let state = AppState::from_config(&config).context("Failed to create API client")?;

    match cli.command {
        Commands::Shorten { url, qr } => handle_shorten(&state, url, qr).await,
        Commands::Open { code } => handle_open(&state, &code).await,
        Commands::Stats { code: Some(code), .. } => handle_stats_detail(&state, &code).await,
        Commands::Stats { code: None, watch } => handle_stats(&state, watch, &config).await,
        Commands::Qr { url, out } => handle_qr(&state, url, &out).await,
    }
}

/// Shortens a URL through the home page flow.
///
/// The QR code is fetched concurrently with the shortening, as the page does
/// while the user types.
async fn handle_shorten(state: &AppState, url: Option<String>, qr: Option<PathBuf>) -> Result<()> {
    println!("{}", "🔗 Shorten URL".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .allow_empty(true)
            .interact_text()?,
    };

    let page = state.shortener_page();
    page.start().await;
    page.set_url(Some(url));

    let outcome = page.shorten().await;
    let message = page.orchestrator().state().status_message();

    match &outcome {
        ShortenOutcome::Shortened(result) => {
            println!("{}", message.unwrap_or_default().green().bold());
            println!();
            println!(
                "  Short link: {}",
                page.short_url(&result.short_code).bright_yellow().bold()
            );
        }
        ShortenOutcome::MissingUrl => {
            println!("{}", message.unwrap_or_default().yellow());
        }
        ShortenOutcome::Failed(_) => {
            println!("{}", message.unwrap_or_default().red().bold());
        }
        ShortenOutcome::Dropped => {}
    }

    if let Some(path) = qr
        && !matches!(outcome, ShortenOutcome::MissingUrl)
    {
        match settled_qr(page.qr_code()).await {
            Some(image) => save_qr(&image, &path)?,
            None => println!("{}", "⚠️  QR code unavailable".yellow()),
        }
    }

    page.stop();
    println!();

    if matches!(outcome, ShortenOutcome::Failed(_)) {
        anyhow::bail!("Shortening failed");
    }
    Ok(())
}

/// Resolves a short code and navigates after the redirect pause.
async fn handle_open(state: &AppState, code: &str) -> Result<()> {
    let resolver = state.redirect_resolver(Arc::new(StdoutNavigator::new()));

    println!("{} {}", "↪ Resolving".bright_blue().bold(), code.cyan());

    resolver.resolve(code).await;

    if let Some(message) = resolver.outcome().error_message() {
        println!("{}", format!("❌ {message}").red());
        println!();
        println!("{}", "Back to the home page:".bright_white());
        resolver.go_home();
        anyhow::bail!("Redirect failed");
    }

    Ok(())
}

/// Prints the statistics table once, or live until Ctrl-C with `--watch`.
async fn handle_stats(state: &AppState, watch: bool, config: &Config) -> Result<()> {
    let poller = state.stats_poller();
    poller.start_polling().await;

    if !poller.is_available() {
        println!(
            "{}",
            "⚠️  Statistics are not available on this server".yellow()
        );
        return Ok(());
    }

    print_stats(&poller, config);

    if watch {
        let mut updates = poller.subscribe();
        loop {
            tokio::select! {
                _ = tokio::signal::ctrl_c() => break,
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    if !poller.is_loading() {
                        print_stats(&poller, config);
                    }
                }
            }
        }
    }

    poller.stop_polling();
    Ok(())
}

async fn handle_stats_detail(state: &AppState, code: &str) -> Result<()> {
    let poller = state.stats_poller();
    let stats = poller
        .stats_for(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e.user_message()))?;

    println!("{}", "📊 Link Statistics".bright_blue().bold());
    println!();
    println!("  Short code: {}", stats.short_code.cyan());
    println!("  Target:     {}", stats.original_url);
    println!(
        "  Clicks:     {}",
        stats.click_count.to_string().bright_white().bold()
    );

    if !stats.recent_clicks.is_empty() {
        println!();
        println!("{}", "  Recent clicks:".bright_white());
        for click in &stats.recent_clicks {
            println!("    {}", click.bright_black());
        }
    }
    println!();

    Ok(())
}

async fn handle_qr(state: &AppState, url: String, out: &Path) -> Result<()> {
    let reactor = state.qr_code_reactor();
    reactor.set_target_url(Some(url));

    let image = settled_qr(&reactor)
        .await
        .context("QR code unavailable for this URL")?;
    save_qr(&image, out)
}

/// Waits for the outstanding QR fetch to finish.
async fn settled_qr<G>(reactor: &QrCodeReactor<G>) -> Option<QrImage>
where
    G: ShortenerGateway + ?Sized + 'static,
{
    let mut rx = reactor.subscribe();
    let image = rx.wait_for(|s| !s.pending).await.ok()?.qr_image.clone();
    image
}

fn save_qr(image: &QrImage, path: &Path) -> Result<()> {
    std::fs::write(path, image.bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "{} {}",
        "✅ QR code saved to".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Renders the statistics table.
///
/// ```text
///   Code        Original URL                                        Clicks  Created
///   ─────────────────────────────────────────────────────────────────────────────────
///   abc123      https://example.com/some/long/path                      12  2024-01-15
/// ```
fn print_stats<G>(poller: &StatsPoller<G>, config: &Config)
where
    G: ShortenerGateway + ?Sized + 'static,
{
    let state = poller.state();

    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();
    println!(
        "  Total URLs:   {}",
        state.total_urls().to_string().bright_white().bold()
    );
    println!(
        "  Total clicks: {}",
        state.total_clicks().to_string().bright_white().bold()
    );
    if let Some(top) = state.most_popular() {
        println!(
            "  Most popular: {} ({} clicks)",
            top.short_code.cyan(),
            top.click_count
        );
    }
    println!();

    if state.stats.is_empty() {
        println!("{}", "  No links yet".yellow());
        println!();
        return;
    }

    println!(
        "  {:<10}  {:<53} {:>6}  {:<10}",
        "Code".bright_white().bold(),
        "Original URL".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "─".repeat(85).bright_black());

    for stat in &state.stats {
        print_row(stat);
    }
    println!();
    println!(
        "  Short links are served from {}",
        config.public_base_url.bright_black()
    );
    println!();
}

fn print_row(stat: &ClickStats) {
    println!(
        "  {:<10}  {:<53} {:>6}  {}",
        stat.short_code.cyan(),
        truncate_url(&stat.original_url),
        stat.click_count,
        format_created(stat).bright_black()
    );
}
