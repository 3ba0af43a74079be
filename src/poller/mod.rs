//! Background polling of the remote tunnel API.
//!
//! The poller mirrors the tunnel's reported status into a shared
//! [`StatusStore`]. Every failure is logged and contained; the store is
//! only written after a well-formed `success: true` response.

mod config;
mod error;
pub mod parser;


pub use config::*;
pub use error::*;
pub use parser::{ApiResponse, TunnelResult};

use crate::config::TunnelConfig;
use crate::status::{StatusStore, TunnelSnapshot};
use chrono::{DateTime, Utc};
use reqwest::header::CONTENT_TYPE;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Periodically fetches tunnel status and stores the result.
pub struct StatusPoller {
    /// Shared state, also read by the status page
    store: Arc<StatusStore>,
    client: reqwest::Client,
    config: PollerConfig,
    endpoint: String,
    api_token: String,
}

impl StatusPoller {
    /// Create a poller whose HTTP client enforces `config.timeout_seconds`.
    pub fn new(
        store: Arc<StatusStore>,
        tunnel: &TunnelConfig,
        config: PollerConfig,
    ) -> Result<Self, PollError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| PollError::Client(e.to_string()))?;

        Ok(Self::with_client(store, tunnel, config, client))
    }

    /// Create a poller with a custom HTTP client (for testing).
    pub fn with_client(
        store: Arc<StatusStore>,
        tunnel: &TunnelConfig,
        config: PollerConfig,
        client: reqwest::Client,
    ) -> Self {
        Self {
            store,
            client,
            config,
            endpoint: tunnel.endpoint(),
            api_token: tunnel.api_token.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch and parse the tunnel resource without touching the store.
    ///
    /// The body is parsed whatever the HTTP status, since the API reports
    /// errors inside the JSON envelope. Returns the parsed response and the
    /// raw body.
    pub async fn fetch(&self) -> Result<(ApiResponse, String), PollError> {
        let request = self
            .client
            .get(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .bearer_auth(&self.api_token)
            .build()
            .map_err(|e| PollError::Request(e.to_string()))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| Self::classify_error(e, self.config.timeout_seconds))?;

        let http_status = response.status();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                PollError::Timeout(self.config.timeout_seconds)
            } else {
                PollError::Body(e.to_string())
            }
        })?;

        if !http_status.is_success() {
            tracing::debug!(
                http_status = http_status.as_u16(),
                "Tunnel API returned non-success HTTP status"
            );
        }

        let parsed = parser::parse_response(&body)?;
        Ok((parsed, body))
    }

    /// Classify reqwest error into PollError.
    fn classify_error(e: reqwest::Error, timeout_seconds: u64) -> PollError {
        if e.is_timeout() {
            PollError::Timeout(timeout_seconds)
        } else if e.is_builder() {
            PollError::Request(e.to_string())
        } else {
            PollError::ConnectionFailed(e.to_string())
        }
    }

    /// Store the result of a parsed response.
    ///
    /// Only `success: true` mutates the store; `success: false` comes back as
    /// [`PollError::ApiFailure`] carrying the raw body.
    pub fn apply(
        &self,
        response: ApiResponse,
        body: &str,
        now: DateTime<Utc>,
    ) -> Result<TunnelSnapshot, PollError> {
        if !response.success {
            return Err(PollError::ApiFailure {
                body: body.to_string(),
            });
        }

        let Some(result) = response.result else {
            return Err(PollError::Parse(
                "response reported success without a result".to_string(),
            ));
        };

        if !result.status.is_recognized() {
            tracing::warn!(
                status = %result.status,
                "Tunnel API reported an unrecognized status"
            );
            crate::metrics::record_unrecognized_status();
        }

        let snapshot = TunnelSnapshot {
            status: result.status,
            active_at: result.conns_active_at,
            observed_at: now,
        };
        self.store.update(snapshot.clone());
        crate::metrics::record_status_update(&snapshot);

        Ok(snapshot)
    }

    /// Run one poll cycle: fetch, then apply.
    pub async fn poll_once(&self) -> Result<TunnelSnapshot, PollError> {
        let start = Instant::now();
        let result = match self.fetch().await {
            Ok((response, body)) => self.apply(response, &body, Utc::now()),
            Err(e) => Err(e),
        };

        let elapsed = start.elapsed();
        match &result {
            Ok(snapshot) => {
                crate::metrics::record_poll("success", elapsed);
                tracing::debug!(
                    status = %snapshot.status,
                    active_at = ?snapshot.active_at,
                    "Tunnel status updated"
                );
            }
            Err(PollError::ApiFailure { body }) => {
                crate::metrics::record_poll("api_failure", elapsed);
                tracing::warn!(body = %body, "Tunnel API response indicates failure");
            }
            Err(e) => {
                crate::metrics::record_poll(e.kind(), elapsed);
                tracing::warn!(error = %e, endpoint = %self.endpoint, "Error polling tunnel API");
            }
        }

        result
    }

    /// Start the poller background task.
    ///
    /// Polls immediately, then every `interval_seconds`. Returns a
    /// JoinHandle that resolves once `cancel_token` is cancelled.
    pub fn start(self, cancel_token: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_secs(self.config.interval_seconds));
            interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            tracing::info!(
                interval_seconds = self.config.interval_seconds,
                timeout_seconds = self.config.timeout_seconds,
                "Status poller started"
            );

            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Status poller shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        // An in-flight request is dropped if shutdown arrives first
                        tokio::select! {
                            _ = cancel_token.cancelled() => {
                                tracing::info!("Status poller shutting down");
                                break;
                            }
                            _ = self.poll_once() => {}
                        }
                    }
                }
            }
        })
    }
}
