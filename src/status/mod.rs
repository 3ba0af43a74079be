//! Shared tunnel status state.
//!
//! The poller is the only writer; every page render takes a read snapshot.
//! A snapshot is replaced as a whole, so readers never see a status paired
//! with a timestamp from a different poll.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::RwLock;

/// Pill colour used for anything that is not a known status.
pub const DEFAULT_COLOR: &str = "darkslategray";

/// Health of the tunnel as reported by the remote API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TunnelStatus {
    Healthy,
    Inactive,
    Degraded,
    Down,
    /// Anything else the API sends, kept verbatim for display
    Unrecognized(String),
}

impl TunnelStatus {
    /// Parse the wire value. Matching is exact, as the API reports lowercase.
    pub fn parse(value: &str) -> Self {
        match value {
            "healthy" => TunnelStatus::Healthy,
            "inactive" => TunnelStatus::Inactive,
            "degraded" => TunnelStatus::Degraded,
            "down" => TunnelStatus::Down,
            other => TunnelStatus::Unrecognized(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            TunnelStatus::Healthy => "healthy",
            TunnelStatus::Inactive => "inactive",
            TunnelStatus::Degraded => "degraded",
            TunnelStatus::Down => "down",
            TunnelStatus::Unrecognized(raw) => raw,
        }
    }

    /// CSS colour for the status pill.
    pub fn color(&self) -> &'static str {
        match self {
            TunnelStatus::Healthy => "green",
            TunnelStatus::Inactive => DEFAULT_COLOR,
            TunnelStatus::Degraded => "orangered",
            TunnelStatus::Down => "red",
            TunnelStatus::Unrecognized(_) => DEFAULT_COLOR,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TunnelStatus::Unrecognized(_))
    }
}

impl From<String> for TunnelStatus {
    fn from(value: String) -> Self {
        TunnelStatus::parse(&value)
    }
}

impl From<TunnelStatus> for String {
    fn from(status: TunnelStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for TunnelStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Last successfully polled tunnel state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TunnelSnapshot {
    pub status: TunnelStatus,
    /// Last connection activity reported by the API (`None` when it sent null)
    pub active_at: Option<DateTime<Utc>>,
    /// When this snapshot was stored
    pub observed_at: DateTime<Utc>,
}

/// Owned, lock-guarded holder for the latest [`TunnelSnapshot`].
///
/// `None` means no poll has succeeded since startup.
#[derive(Debug, Default)]
pub struct StatusStore {
    current: RwLock<Option<TunnelSnapshot>>,
}

impl StatusStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored snapshot. Status and timestamp change together.
    pub fn update(&self, snapshot: TunnelSnapshot) {
        match self.current.write() {
            Ok(mut guard) => *guard = Some(snapshot),
            Err(poisoned) => {
                tracing::warn!("Status lock poisoned in update, recovering");
                *poisoned.into_inner() = Some(snapshot);
            }
        }
    }

    /// Clone of the current snapshot, taken under the read lock.
    pub fn snapshot(&self) -> Option<TunnelSnapshot> {
        match self.current.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => {
                tracing::warn!("Status lock poisoned in snapshot, recovering");
                poisoned.into_inner().clone()
            }
        }
    }

    pub fn has_polled(&self) -> bool {
        self.snapshot().is_some()
    }
}
