//! Remote tunnel API settings

use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

/// Identifies the tunnel to watch and the credentials used to read it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TunnelConfig {
    pub account_id: String,
    pub tunnel_id: String,
    pub api_token: String,
    pub api_base_url: String,
}

impl Default for TunnelConfig {
    fn default() -> Self {
        Self {
            account_id: String::new(),
            tunnel_id: String::new(),
            api_token: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
        }
    }
}

impl TunnelConfig {
    /// Full URL of the tunnel resource.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/accounts/{}/cfd_tunnel/{}",
            self.api_base_url.trim_end_matches('/'),
            self.account_id,
            self.tunnel_id
        )
    }
}

// Keep the token out of logs
impl fmt::Debug for TunnelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = if self.api_token.is_empty() {
            "<unset>"
        } else {
            "<redacted>"
        };
        f.debug_struct("TunnelConfig")
            .field("account_id", &self.account_id)
            .field("tunnel_id", &self.tunnel_id)
            .field("api_token", &token)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}
