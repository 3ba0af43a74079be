//! CLI module
//!
//! Command-line interface definitions and handlers.
//!
//! # Commands
//!
//! - `serve` - Poll the tunnel API and serve the status page
//! - `check` - Poll once and print the result
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Serve on the default port, credentials from the environment
//! ACCOUNT_ID=... TUNNEL_ID=... API_TOKEN=... tunnel-status serve
//!
//! # One-off check as JSON
//! tunnel-status check --json
//! ```

pub mod check;
pub mod completions;
pub mod config;
pub mod output;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tunnel-status.toml";

/// Tunnel status page
#[derive(Parser, Debug)]
#[command(
    name = "tunnel-status",
    version,
    about = "Status page for a remote tunnel"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll the tunnel API and serve the status page
    Serve(ServeArgs),
    /// Poll the tunnel API once and print the status
    Check(CheckArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file (optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long)]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Serve the page without polling
    #[arg(long)]
    pub no_poll: bool,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Path to configuration file (optional)
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Write an example configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["tunnel-status", "serve"]).unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.config, PathBuf::from("tunnel-status.toml"));
                assert!(args.port.is_none());
                assert!(!args.no_poll);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_serve_with_overrides() {
        let cli = Cli::try_parse_from([
            "tunnel-status",
            "serve",
            "-p",
            "9000",
            "-H",
            "127.0.0.1",
            "--no-poll",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.port, Some(9000));
                assert_eq!(args.host.as_deref(), Some("127.0.0.1"));
                assert!(args.no_poll);
            }
            _ => panic!("Expected Serve command"),
        }
    }

    #[test]
    fn test_cli_parse_check_json() {
        let cli = Cli::try_parse_from(["tunnel-status", "check", "--json"]).unwrap();
        match cli.command {
            Commands::Check(args) => assert!(args.json),
            _ => panic!("Expected Check command"),
        }
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["tunnel-status", "config", "init", "--force"]).unwrap();
        match cli.command {
            Commands::Config(ConfigCommands::Init(args)) => assert!(args.force),
            _ => panic!("Expected Config Init command"),
        }
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["tunnel-status", "serve", "-p", "99999"]).is_err());
    }
}
