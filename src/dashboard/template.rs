//! HTML rendering for the status page

use askama::Template;

use super::view::StatusView;
use crate::config::DashboardConfig;

/// The embedded page. Askama escapes every interpolated value, so remote
/// status text cannot inject markup.
#[derive(Template)]
#[template(path = "index.html")]
struct StatusPage<'a> {
    title: &'a str,
    status_color: &'a str,
    status: &'a str,
    uptime: &'a str,
    uptime_seconds: u64,
    refresh_millis: u64,
}

/// Render the status page.
pub fn render(view: &StatusView, config: &DashboardConfig) -> Result<String, askama::Error> {
    StatusPage {
        title: &config.title,
        status_color: view.color,
        status: &view.status,
        uptime: &view.uptime,
        uptime_seconds: view.uptime_seconds,
        refresh_millis: config.refresh_seconds.saturating_mul(1000),
    }
    .render()
}
