//! Formatting helpers for statistics tables and short links.

use crate::domain::entities::ClickStats;

const MAX_DISPLAYED_URL_CHARS: usize = 50;

/// Cuts long URLs to 50 characters followed by `...`.
pub fn truncate_url(url: &str) -> String {
    if url.chars().count() > MAX_DISPLAYED_URL_CHARS {
        let head: String = url.chars().take(MAX_DISPLAYED_URL_CHARS).collect();
        format!("{head}...")
    } else {
        url.to_string()
    }
}

/// Full short link for a code under the public base URL.
pub fn short_url(public_base: &str, short_code: &str) -> String {
    format!("{}/{}", public_base.trim_end_matches('/'), short_code)
}

/// Creation date as `YYYY-MM-DD`, or the raw value when it does not parse.
pub fn format_created(stat: &ClickStats) -> String {
    stat.created_date()
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| stat.created_at.clone())
}
