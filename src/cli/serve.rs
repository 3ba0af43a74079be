//! Serve command implementation

use crate::api::{create_router, AppState};
use crate::cli::ServeArgs;
use crate::config::{ConfigError, LogFormat, StatusPageConfig};
use crate::poller::StatusPoller;
use crate::status::StatusStore;
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Load the config file if present, then apply environment overrides.
pub fn load_base_config(path: &Path) -> Result<StatusPageConfig, ConfigError> {
    let config = if path.exists() {
        StatusPageConfig::load(Some(path))?
    } else {
        tracing::debug!(path = %path.display(), "Config file not found, using defaults");
        StatusPageConfig::default()
    };

    Ok(config.with_env_overrides())
}

/// Load configuration with CLI overrides
pub fn load_config_with_overrides(args: &ServeArgs) -> Result<StatusPageConfig, ConfigError> {
    let mut config = load_base_config(&args.config)?;

    // CLI overrides (highest priority)
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(ref host) = args.host {
        config.server.host = host.clone();
    }
    if let Some(ref log_level) = args.log_level {
        config.logging.level = log_level.clone();
    }
    if args.no_poll {
        config.poller.enabled = false;
    }

    Ok(config)
}

/// Initialize tracing based on configuration
pub fn init_tracing(
    config: &crate::config::LoggingConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter_str = crate::logging::build_filter_directives(config);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&filter_str));

    match config.format {
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()?;
        }
    }

    Ok(())
}

/// Wait for shutdown signal (SIGINT or SIGTERM)
async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for CTRL+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received SIGINT, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
        _ = cancel_token.cancelled() => {}
    }

    cancel_token.cancel();
}

/// Main serve command handler
pub async fn run_serve(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    // 1. Load, merge and validate configuration; missing credentials stop here
    let config = load_config_with_overrides(&args)?;
    config.validate()?;

    // 2. Initialize tracing
    init_tracing(&config.logging)?;
    tracing::debug!(?config, "Loaded configuration");

    // 3. Metrics exporter on its own listener
    if config.metrics.enabled {
        let addr = crate::metrics::setup_metrics(&config.metrics)?;
        tracing::info!(addr = %addr, "Prometheus exporter listening");
    }

    // 4. Shared state and router
    let store = Arc::new(StatusStore::new());
    let config = Arc::new(config);
    let app = create_router(Arc::new(AppState::new(
        Arc::clone(&store),
        Arc::clone(&config),
    )));

    // 5. Start poller
    let cancel_token = CancellationToken::new();
    let poller_handle = if config.poller.enabled {
        let poller = StatusPoller::new(Arc::clone(&store), &config.tunnel, config.poller.clone())?;
        tracing::info!(
            endpoint = %poller.endpoint(),
            interval_seconds = config.poller.interval_seconds,
            "Polling tunnel API"
        );
        Some(poller.start(cancel_token.clone()))
    } else {
        tracing::info!("Polling disabled");
        None
    };

    // 6. Bind and serve
    let addr = config.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Status server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token.clone()))
        .await?;

    // 7. Cleanup
    cancel_token.cancel();
    if let Some(handle) = poller_handle {
        tracing::info!("Waiting for poller to stop");
        handle.await?;
    }

    tracing::info!("Status server stopped");
    Ok(())
}
