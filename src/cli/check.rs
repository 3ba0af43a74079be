//! Check command implementation

use crate::cli::output::{format_check_json, format_check_table};
use crate::cli::serve::load_base_config;
use crate::cli::CheckArgs;
use crate::dashboard::StatusView;
use crate::poller::StatusPoller;
use crate::status::StatusStore;
use chrono::Utc;
use std::sync::Arc;

/// Handle `tunnel-status check`: one poll, printed, no server.
pub async fn run_check(args: &CheckArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = load_base_config(&args.config)?;
    config.validate()?;

    let store = Arc::new(StatusStore::new());
    let poller = StatusPoller::new(store, &config.tunnel, config.poller.clone())?;
    let snapshot = poller.poll_once().await?;

    let view = StatusView::from_snapshot(Some(&snapshot), Utc::now());
    let output = if args.json {
        format_check_json(&snapshot, &view)
    } else {
        format_check_table(&snapshot, &view)
    };

    Ok(output)
}
