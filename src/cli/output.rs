//! Output formatting helpers for CLI commands

use crate::dashboard::StatusView;
use crate::status::{TunnelSnapshot, TunnelStatus};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

fn colored_status(status: &TunnelStatus) -> String {
    let text = status.as_str();
    match status {
        TunnelStatus::Healthy => text.green().to_string(),
        TunnelStatus::Degraded => text.yellow().to_string(),
        TunnelStatus::Down => text.red().to_string(),
        TunnelStatus::Inactive => text.dimmed().to_string(),
        TunnelStatus::Unrecognized(_) => format!("{} (unrecognized)", text).dimmed().to_string(),
    }
}

/// Format a poll result as a table
pub fn format_check_table(snapshot: &TunnelSnapshot, view: &StatusView) -> String {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Status", "Active Since", "Uptime", "Checked At"]);

    let active_since = snapshot
        .active_at
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "-".to_string());

    table.add_row(vec![
        Cell::new(colored_status(&snapshot.status)),
        Cell::new(active_since),
        Cell::new(&view.uptime),
        Cell::new(snapshot.observed_at.to_rfc3339()),
    ]);

    table.to_string()
}

/// Format a poll result as JSON
pub fn format_check_json(snapshot: &TunnelSnapshot, view: &StatusView) -> String {
    serde_json::to_string_pretty(&json!({
        "status": snapshot.status,
        "color": view.color,
        "active_at": snapshot.active_at,
        "uptime_seconds": view.uptime_seconds,
        "uptime": view.uptime,
        "checked_at": snapshot.observed_at,
    }))
    .unwrap_or_else(|_| "{}".to_string())
}
