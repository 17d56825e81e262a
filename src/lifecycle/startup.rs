//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate configuration
//! - Initialize logging and metrics
//! - Build the router (fail fast on invalid routes)
//! - Start the config watcher and signal handler
//! - Bind the listener and begin accepting traffic
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::net::SocketAddr;
use std::path::PathBuf;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use crate::config::{load_config, watcher::ConfigWatcher, SubrouterConfig};
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals::spawn_signal_handler;
use crate::observability::{logging, metrics};

/// Process-level options.
#[derive(Debug, Clone, Default)]
pub struct StartupOptions {
    /// Configuration file; defaults are used when absent.
    pub config_path: Option<PathBuf>,
    /// Reload the configuration file when it changes.
    pub watch: bool,
}

/// Start the server and block until shutdown.
pub async fn run(options: StartupOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &options.config_path {
        Some(path) => load_config(path)?,
        None => SubrouterConfig::default(),
    };

    logging::init_logging(&config.observability.log_level);
    tracing::info!("subrouter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        i18n = config.i18n.enabled,
        policy = ?config.routing.base_domain_policy,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr);
    }

    let server = HttpServer::new(config.clone())?;

    // Keep the watcher alive for the lifetime of the server.
    let (config_updates, _watcher) = match (&options.config_path, options.watch) {
        (Some(path), true) => {
            let (watcher, updates) = ConfigWatcher::new(path);
            (updates, Some(watcher.run()?))
        }
        _ => {
            let (_, updates) = mpsc::unbounded_channel();
            (updates, None)
        }
    };

    let shutdown = Shutdown::new();
    spawn_signal_handler(&shutdown);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
