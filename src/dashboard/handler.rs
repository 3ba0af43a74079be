//! HTTP handler for the status page

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use chrono::Utc;
use std::sync::Arc;

use super::template;
use super::view::StatusView;
use crate::api::AppState;

/// `GET /` - render the last known tunnel status.
///
/// The read lock is held only long enough to clone the snapshot.
pub async fn status_page(State(state): State<Arc<AppState>>) -> Response {
    let snapshot = state.store.snapshot();
    let view = StatusView::from_snapshot(snapshot.as_ref(), Utc::now());

    if !view.polled {
        tracing::debug!("Rendering status page before first successful poll");
    }

    match template::render(&view, &state.config.dashboard) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to render status page");
            (StatusCode::INTERNAL_SERVER_ERROR, "failed to render status page").into_response()
        }
    }
}
