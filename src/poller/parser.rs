//! Tunnel API response parsing.

use super::error::PollError;
use crate::status::TunnelStatus;
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Envelope returned by the tunnel endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    /// Absent or null on most failures
    #[serde(default)]
    pub result: Option<TunnelResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TunnelResult {
    pub status: TunnelStatus,
    /// RFC 3339; null for tunnels that never connected
    #[serde(default)]
    pub conns_active_at: Option<DateTime<Utc>>,
}

/// Parse a response body.
///
/// `success: true` without a `result` object is treated as malformed.
pub fn parse_response(body: &str) -> Result<ApiResponse, PollError> {
    let response: ApiResponse =
        serde_json::from_str(body).map_err(|e| PollError::Parse(e.to_string()))?;

    if response.success && response.result.is_none() {
        return Err(PollError::Parse(
            "response reported success without a result".to_string(),
        ));
    }

    Ok(response)
}
