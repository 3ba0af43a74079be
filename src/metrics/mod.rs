//! # Metrics
//!
//! Poller counters and gauges recorded through the `metrics` facade.
//! When enabled, a Prometheus exporter serves them on its own listener.
//!
//! **Counters:**
//! - `tunnel_status_polls_total{outcome}` - Poll cycles by outcome
//! - `tunnel_status_unrecognized_total` - Statuses outside the known set (the
//!   raw text goes to the log, never into a label)
//!
//! **Gauges:**
//! - `tunnel_status_last_update_timestamp_seconds` - When the store was last written
//! - `tunnel_status_healthy` - 1 while the last known status is `healthy`
//!
//! **Histograms:**
//! - `tunnel_status_poll_duration_seconds{outcome}` - Poll round-trip time
//!
//! Without an installed recorder every call is a no-op.

use crate::config::MetricsConfig;
use crate::status::{TunnelSnapshot, TunnelStatus};
use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Round-trip buckets in seconds, topping out near the default request timeout.
const POLL_DURATION_BUCKETS: &[f64] = &[0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0];

/// Install the Prometheus recorder with an HTTP listener on `host:port`.
pub fn setup_metrics(config: &MetricsConfig) -> Result<SocketAddr, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    PrometheusBuilder::new()
        .with_http_listener(addr)
        .set_buckets_for_metric(
            Matcher::Full("tunnel_status_poll_duration_seconds".to_string()),
            POLL_DURATION_BUCKETS,
        )?
        .install()?;

    Ok(addr)
}

/// Count one poll cycle.
pub fn record_poll(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("tunnel_status_polls_total", "outcome" => outcome).increment(1);
    metrics::histogram!("tunnel_status_poll_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

pub fn record_unrecognized_status() {
    metrics::counter!("tunnel_status_unrecognized_total").increment(1);
}

/// Gauges reflecting the snapshot just stored.
pub fn record_status_update(snapshot: &TunnelSnapshot) {
    metrics::gauge!("tunnel_status_last_update_timestamp_seconds")
        .set(snapshot.observed_at.timestamp() as f64);

    let healthy = if snapshot.status == TunnelStatus::Healthy {
        1.0
    } else {
        0.0
    };
    metrics::gauge!("tunnel_status_healthy").set(healthy);
}
