//! Status page
//!
//! A single self-refreshing HTML page served at `/` showing:
//! - the tunnel status as a coloured pill
//! - time since the tunnel's last connection activity, ticking client-side
//!
//! The page reloads itself every `dashboard.refresh_seconds`.

pub mod handler;
pub mod template;
pub mod view;

pub use handler::status_page;
pub use view::StatusView;
