//! Click statistics entities and the aggregates derived from them.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Click statistics for one short link, as listed by the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickStats {
    #[serde(alias = "shortCode")]
    pub short_code: String,
    #[serde(alias = "originalUrl")]
    pub original_url: String,
    #[serde(alias = "clickCount", default)]
    pub click_count: u64,
    #[serde(alias = "createdAt", default)]
    pub created_at: String,
}

impl ClickStats {
    pub fn new(
        short_code: impl Into<String>,
        original_url: impl Into<String>,
        click_count: u64,
        created_at: impl Into<String>,
    ) -> Self {
        Self {
            short_code: short_code.into(),
            original_url: original_url.into(),
            click_count,
            created_at: created_at.into(),
        }
    }

    /// Calendar date of creation.
    ///
    /// Accepts RFC 3339 timestamps, naive ISO timestamps and plain dates.
    /// Returns `None` when the backend sent something else.
    pub fn created_date(&self) -> Option<NaiveDate> {
        let raw = self.created_at.trim();

        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.date_naive());
        }
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(ts.date());
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
    }
}

/// Per-link statistics including the most recent click timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailedStats {
    #[serde(alias = "shortCode")]
    pub short_code: String,
    #[serde(alias = "originalUrl")]
    pub original_url: String,
    #[serde(alias = "clickCount", default)]
    pub click_count: u64,
    #[serde(alias = "recentClicks", default)]
    pub recent_clicks: Vec<String>,
}

/// Number of shortened URLs in the snapshot.
pub fn total_urls(stats: &[ClickStats]) -> usize {
    stats.len()
}

/// Sum of click counts over the snapshot.
pub fn total_clicks(stats: &[ClickStats]) -> u64 {
    stats.iter().map(|s| s.click_count).sum()
}

/// Entry with the highest click count.
///
/// On ties the entry seen first wins.
pub fn most_popular(stats: &[ClickStats]) -> Option<&ClickStats> {
    stats.iter().fold(None, |best, current| match best {
        Some(b) if current.click_count <= b.click_count => Some(b),
        _ => Some(current),
    })
}
