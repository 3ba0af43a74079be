//! Status page configuration

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page heading and `<title>`
    pub title: String,
    /// Client-side reload period
    pub refresh_seconds: u64,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: "Server Status".to_string(),
            refresh_seconds: 300,
        }
    }
}
