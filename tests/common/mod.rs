//! Shared test utilities for integration tests.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::Arc;
use tower::Service;
use tunnel_status::api::{create_router, AppState};
use tunnel_status::config::{PollerConfig, StatusPageConfig, TunnelConfig};
use tunnel_status::poller::StatusPoller;
use tunnel_status::status::StatusStore;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ACCOUNT_ID: &str = "test-account";
pub const TUNNEL_ID: &str = "test-tunnel";
pub const API_TOKEN: &str = "test-token";

/// Path the poller requests for the test tunnel.
pub fn tunnel_path() -> String {
    format!("/accounts/{}/cfd_tunnel/{}", ACCOUNT_ID, TUNNEL_ID)
}

pub fn tunnel_config(base_url: &str) -> TunnelConfig {
    TunnelConfig {
        account_id: ACCOUNT_ID.to_string(),
        tunnel_id: TUNNEL_ID.to_string(),
        api_token: API_TOKEN.to_string(),
        api_base_url: base_url.to_string(),
    }
}

/// Poller against `base_url` with a short timeout.
pub fn make_poller(store: Arc<StatusStore>, base_url: &str) -> StatusPoller {
    let config = PollerConfig {
        enabled: true,
        interval_seconds: 300,
        timeout_seconds: 2,
    };
    StatusPoller::new(store, &tunnel_config(base_url), config).unwrap()
}

/// Mount a response for the tunnel endpoint, requiring the expected headers.
pub async fn mount_tunnel_response(server: &MockServer, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(tunnel_path()))
        .and(header("authorization", format!("Bearer {}", API_TOKEN).as_str()))
        .and(header("content-type", "application/json"))
        .respond_with(response)
        .mount(server)
        .await;
}

pub fn tunnel_body(success: bool, status: &str, active_at: &str) -> serde_json::Value {
    serde_json::json!({
        "success": success,
        "errors": [],
        "messages": [],
        "result": {
            "id": TUNNEL_ID,
            "name": "home",
            "status": status,
            "conns_active_at": active_at,
        }
    })
}

pub fn make_router(store: Arc<StatusStore>) -> axum::Router {
    let config = Arc::new(StatusPageConfig::default());
    create_router(Arc::new(AppState::new(store, config)))
}

/// Issue `GET uri` against the router.
pub async fn get(router: &mut axum::Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.call(request).await.unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
