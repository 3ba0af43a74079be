//! Configuration module
//!
//! Layered configuration loading from a TOML file, the environment, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`ACCOUNT_ID`, `TUNNEL_ID`, `API_TOKEN`, `HTTP_PORT`,
//!    `TUNNEL_STATUS_*`), including any loaded from a `.env` file
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use tunnel_status::config::StatusPageConfig;
//!
//! let toml = r#"
//! [tunnel]
//! account_id = "acct"
//! tunnel_id = "tun"
//! api_token = "token"
//! "#;
//! let config: StatusPageConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.server.port, 8080);
//! assert!(config.validate().is_ok());
//! ```

pub mod dashboard;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod server;
pub mod tunnel;

pub use dashboard::DashboardConfig;
pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use metrics::MetricsConfig;
pub use server::ServerConfig;
pub use tunnel::TunnelConfig;

// Re-export PollerConfig from poller module
pub use crate::poller::PollerConfig;

use serde::{Deserialize, Serialize};
use std::path::Path;

pub const ENV_ACCOUNT_ID: &str = "ACCOUNT_ID";
pub const ENV_TUNNEL_ID: &str = "TUNNEL_ID";
pub const ENV_API_TOKEN: &str = "API_TOKEN";
pub const ENV_HTTP_PORT: &str = "HTTP_PORT";
pub const ENV_HOST: &str = "TUNNEL_STATUS_HOST";
pub const ENV_LOG_LEVEL: &str = "TUNNEL_STATUS_LOG_LEVEL";
pub const ENV_LOG_FORMAT: &str = "TUNNEL_STATUS_LOG_FORMAT";

/// Unified configuration for the status page service.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct StatusPageConfig {
    /// HTTP server serving the status page
    pub server: ServerConfig,
    /// Remote tunnel API identity and credentials
    pub tunnel: TunnelConfig,
    /// Background polling
    pub poller: PollerConfig,
    /// Page rendering
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
    pub metrics: MetricsConfig,
}

impl StatusPageConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source.
    ///
    /// Empty or unparseable values are ignored and the current value is kept.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(account_id) = var(ENV_ACCOUNT_ID) {
            self.tunnel.account_id = account_id;
        }
        if let Some(tunnel_id) = var(ENV_TUNNEL_ID) {
            self.tunnel.tunnel_id = tunnel_id;
        }
        if let Some(token) = var(ENV_API_TOKEN) {
            self.tunnel.api_token = token;
        }

        if let Some(port) = var(ENV_HTTP_PORT) {
            if let Ok(p) = port.trim().parse() {
                self.server.port = p;
            }
        }
        if let Some(host) = var(ENV_HOST) {
            self.server.host = host;
        }

        if let Some(level) = var(ENV_LOG_LEVEL) {
            self.logging.level = level;
        }
        if let Some(format) = var(ENV_LOG_FORMAT) {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        self
    }

    /// Validate configuration. Missing credentials are fatal at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("tunnel.account_id", ENV_ACCOUNT_ID, &self.tunnel.account_id),
            ("tunnel.tunnel_id", ENV_TUNNEL_ID, &self.tunnel.tunnel_id),
            ("tunnel.api_token", ENV_API_TOKEN, &self.tunnel.api_token),
        ];
        for (field, env_var, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingField {
                    field: field.to_string(),
                    env_var: env_var.to_string(),
                });
            }
        }

        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }
        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "server.request_timeout_seconds".to_string(),
                message: "request timeout must be at least one second".to_string(),
            });
        }
        if self.poller.interval_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "poller.interval_seconds".to_string(),
                message: "interval must be at least one second".to_string(),
            });
        }
        if self.poller.timeout_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "poller.timeout_seconds".to_string(),
                message: "timeout must be at least one second".to_string(),
            });
        }
        if self.dashboard.refresh_seconds == 0 {
            return Err(ConfigError::Validation {
                field: "dashboard.refresh_seconds".to_string(),
                message: "refresh interval must be at least one second".to_string(),
            });
        }
        if self.metrics.enabled && self.metrics.port == 0 {
            return Err(ConfigError::Validation {
                field: "metrics.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::path::Path;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn configured() -> StatusPageConfig {
        let vars = env(&[
            (ENV_ACCOUNT_ID, "acct"),
            (ENV_TUNNEL_ID, "tun"),
            (ENV_API_TOKEN, "token"),
        ]);
        StatusPageConfig::default().with_overrides_from(|k| vars.get(k).cloned())
    }

    #[test]
    fn test_config_defaults() {
        let config = StatusPageConfig::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.poller.interval_seconds, 300);
        assert_eq!(config.dashboard.refresh_seconds, 300);
        assert!(config.poller.enabled);
        assert!(!config.metrics.enabled);
    }

    #[test]
    fn test_config_parse_minimal_toml() {
        let toml = r#"
        [server]
        port = 9000
        "#;

        let config: StatusPageConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
    }

    #[test]
    fn test_config_parse_example_toml() {
        let toml = include_str!("../../tunnel-status.example.toml");
        let config: StatusPageConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.poller.interval_seconds, 300);
    }

    #[test]
    fn test_config_load_from_file() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[tunnel]\naccount_id = \"from-file\"").unwrap();

        let config = StatusPageConfig::load(Some(temp.path())).unwrap();
        assert_eq!(config.tunnel.account_id, "from-file");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), "[server\nport = ").unwrap();

        let result = StatusPageConfig::load(Some(temp.path()));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_config_missing_file_error() {
        let result = StatusPageConfig::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_config_load_none_returns_defaults() {
        let config = StatusPageConfig::load(None).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_overrides_credentials() {
        let config = configured();
        assert_eq!(config.tunnel.account_id, "acct");
        assert_eq!(config.tunnel.tunnel_id, "tun");
        assert_eq!(config.tunnel.api_token, "token");
    }

    #[test]
    fn test_env_override_port() {
        let vars = env(&[(ENV_HTTP_PORT, "9999")]);
        let config = StatusPageConfig::default().with_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.server.port, 9999);
    }

    #[test]
    fn test_env_invalid_port_ignored() {
        let vars = env(&[(ENV_HTTP_PORT, "not-a-number")]);
        let config = StatusPageConfig::default().with_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_env_empty_value_keeps_file_value() {
        let mut base = StatusPageConfig::default();
        base.tunnel.account_id = "from-file".to_string();

        let vars = env(&[(ENV_ACCOUNT_ID, "")]);
        let config = base.with_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.tunnel.account_id, "from-file");
    }

    #[test]
    fn test_env_override_log_settings() {
        let vars = env(&[(ENV_LOG_LEVEL, "debug"), (ENV_LOG_FORMAT, "json")]);
        let config = StatusPageConfig::default().with_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_env_invalid_log_format_ignored() {
        let vars = env(&[(ENV_LOG_FORMAT, "xml")]);
        let config = StatusPageConfig::default().with_overrides_from(|k| vars.get(k).cloned());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_validation_passes_with_credentials() {
        assert!(configured().validate().is_ok());
    }

    #[test]
    fn test_validation_missing_account_id() {
        let result = StatusPageConfig::default().validate();
        assert!(matches!(
            result,
            Err(ConfigError::MissingField { ref env_var, .. }) if env_var == "ACCOUNT_ID"
        ));
    }

    #[test]
    fn test_validation_missing_token() {
        let mut config = configured();
        config.tunnel.api_token = "   ".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { ref field, .. }) if field == "tunnel.api_token"
        ));
    }

    #[test]
    fn test_validation_zero_port() {
        let mut config = configured();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "server.port"
        ));
    }

    #[test]
    fn test_validation_zero_interval() {
        let mut config = configured();
        config.poller.interval_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "poller.interval_seconds"
        ));
    }

    #[test]
    fn test_validation_zero_refresh() {
        let mut config = configured();
        config.dashboard.refresh_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "dashboard.refresh_seconds"
        ));
    }

    #[test]
    fn test_validation_zero_request_timeout() {
        let mut config = configured();
        config.server.request_timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "server.request_timeout_seconds"
        ));
    }

    #[test]
    fn test_validation_zero_timeout() {
        let mut config = configured();
        config.poller.timeout_seconds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation { ref field, .. }) if field == "poller.timeout_seconds"
        ));
    }
}
