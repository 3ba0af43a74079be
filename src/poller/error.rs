//! Error types for status polling.

use thiserror::Error;

/// Reasons a poll cycle left the stored status untouched.
#[derive(Debug, Clone, Error)]
pub enum PollError {
    /// HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(String),

    /// Request could not be built (bad URL, bad header value)
    #[error("failed to create request: {0}")]
    Request(String),

    #[error("request timeout after {0}s")]
    Timeout(u64),

    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("invalid response: {0}")]
    Parse(String),

    /// API answered with `success: false`
    #[error("API reported failure: {body}")]
    ApiFailure { body: String },
}

impl PollError {
    /// Short label used for the `outcome` metric.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Client(_) => "client",
            PollError::Request(_) => "request",
            PollError::Timeout(_) => "timeout",
            PollError::ConnectionFailed(_) => "connection",
            PollError::Body(_) => "body",
            PollError::Parse(_) => "parse",
            PollError::ApiFailure { .. } => "api_failure",
        }
    }
}
