//! Tunnel status page
//!
//! Polls a remote tunnel API in the background and serves a self-refreshing
//! HTML page showing the last known status and how long the tunnel has been
//! active.

pub mod api;
pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod metrics;
pub mod poller;
pub mod status;
