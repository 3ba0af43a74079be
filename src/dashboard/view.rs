//! View model for the status page

use crate::status::{TunnelSnapshot, DEFAULT_COLOR};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Everything the page template needs, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusView {
    /// CSS colour of the status pill
    pub color: &'static str,
    /// Status text as reported by the API (empty before the first poll)
    pub status: String,
    /// Seed for the client-side counter
    pub uptime_seconds: u64,
    /// Server-rendered uptime, e.g. `1h2m3s`
    pub uptime: String,
    /// False until a poll has succeeded
    pub polled: bool,
}

impl StatusView {
    /// Build the view at `now`.
    ///
    /// Before the first successful poll the page shows the default colour,
    /// an empty status and zero uptime.
    pub fn from_snapshot(snapshot: Option<&TunnelSnapshot>, now: DateTime<Utc>) -> Self {
        match snapshot {
            Some(snapshot) => {
                let uptime_seconds = uptime_seconds(snapshot.active_at, now);
                Self {
                    color: snapshot.status.color(),
                    status: snapshot.status.as_str().to_string(),
                    uptime_seconds,
                    uptime: format_uptime(uptime_seconds),
                    polled: true,
                }
            }
            None => Self {
                color: DEFAULT_COLOR,
                status: String::new(),
                uptime_seconds: 0,
                uptime: format_uptime(0),
                polled: false,
            },
        }
    }
}

/// Whole seconds elapsed since `active_at`, truncated.
///
/// Zero when the timestamp is unset or lies in the future.
pub fn uptime_seconds(active_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u64 {
    active_at
        .map(|at| (now - at).num_seconds().max(0) as u64)
        .unwrap_or(0)
}

/// Format seconds as `XhYmZs`, dropping leading zero units (`0s`, `45s`, `2m5s`, `1h0m0s`).
pub fn format_uptime(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
