//! Config command handlers

use crate::cli::ConfigInitArgs;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../tunnel-status.example.toml");

/// Handle `tunnel-status config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.output.exists() && !args.force {
        return Err(format!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        )
        .into());
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    println!("✓ Configuration file created: {}", args.output.display());
    println!("  Set ACCOUNT_ID, TUNNEL_ID and API_TOKEN, or fill in [tunnel].");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigError, StatusPageConfig};

    fn init(dir: &tempfile::TempDir, force: bool) -> std::path::PathBuf {
        let output = dir.path().join("tunnel-status.toml");
        handle_config_init(&ConfigInitArgs {
            output: output.clone(),
            force,
        })
        .unwrap();
        output
    }

    #[test]
    fn test_config_init_file_loads_with_poller_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = init(&temp_dir, false);

        let config = StatusPageConfig::load(Some(&path)).unwrap();
        assert_eq!(config.poller.interval_seconds, 300);
        assert_eq!(config.poller.timeout_seconds, 30);
        assert_eq!(
            config.tunnel.api_base_url,
            crate::config::tunnel::DEFAULT_API_BASE_URL
        );
    }

    #[test]
    fn test_config_init_file_needs_credentials() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = init(&temp_dir, false);

        // Credentials are commented out in the generated file
        let config = StatusPageConfig::load(Some(&path)).unwrap();
        assert!(config.tunnel.account_id.is_empty());
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingField { ref env_var, .. }) if env_var == "ACCOUNT_ID"
        ));
    }

    #[test]
    fn test_config_init_no_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("tunnel-status.toml");
        std::fs::write(&output_path, "[poller]\ninterval_seconds = 60\n").unwrap();

        let args = ConfigInitArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(handle_config_init(&args).is_err());
        let config = StatusPageConfig::load(Some(&output_path)).unwrap();
        assert_eq!(config.poller.interval_seconds, 60);
    }

    #[test]
    fn test_config_init_force_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("tunnel-status.toml");
        std::fs::write(&output_path, "[poller]\ninterval_seconds = 60\n").unwrap();

        init(&temp_dir, true);
        let config = StatusPageConfig::load(Some(&output_path)).unwrap();
        assert_eq!(config.poller.interval_seconds, 300);
    }
}
