//! # Status Server
//!
//! HTTP wiring for the status page.
//!
//! ## Endpoints
//!
//! - `GET /` - Rendered status page (always `200 text/html`)
//!
//! ## Example
//!
//! ```no_run
//! use tunnel_status::api::{create_router, AppState};
//! use tunnel_status::config::StatusPageConfig;
//! use tunnel_status::status::StatusStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(StatusStore::new());
//! let config = Arc::new(StatusPageConfig::default());
//! let app = create_router(Arc::new(AppState::new(store, config)));
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8080").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! Handlers only read the shared [`StatusStore`]; the poller is the sole writer.

use crate::config::StatusPageConfig;
use crate::dashboard;
use crate::status::StatusStore;
use axum::{routing::get, Router};
use std::sync::Arc;
use std::time::Duration;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Shared application state accessible to all handlers.
pub struct AppState {
    /// Last known tunnel status, written by the poller
    pub store: Arc<StatusStore>,
    pub config: Arc<StatusPageConfig>,
}

impl AppState {
    pub fn new(store: Arc<StatusStore>, config: Arc<StatusPageConfig>) -> Self {
        Self { store, config }
    }
}

/// Create the router. The status page is the only route.
pub fn create_router(state: Arc<AppState>) -> Router {
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_seconds);

    Router::new()
        .route("/", get(dashboard::status_page))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
