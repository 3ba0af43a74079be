//! Log filter construction
//!
//! Turns [`LoggingConfig`](crate::config::LoggingConfig) into an `EnvFilter`
//! directive string. `RUST_LOG`, when set, takes precedence at startup.

/// Build filter directives string from LoggingConfig
///
/// The base level applies everywhere; each component level is scoped to
/// `tunnel_status::<component>`.
///
/// # Examples
///
/// ```
/// use tunnel_status::config::{LogFormat, LoggingConfig};
/// use tunnel_status::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("poller".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
/// };
///
/// assert_eq!(build_filter_directives(&config), "info,tunnel_status::poller=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",tunnel_status::{}={}", component, level));
        }
    }

    filter_str
}
