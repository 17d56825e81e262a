//! Locale- and subdomain-aware rewrite server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::middleware ──▶ routing::matcher (excluded? pass)
//!                                      │
//!                                      ▼
//!                             routing::intl (IntlSubrouter)
//!                              │                     │
//!                 locale prefix in path?       no → i18n::detector
//!                              │                     │ (redirect wins)
//!                              ▼                     ▼
//!                     routing::subrouter (hostname → resolver → guards)
//!                              │
//!                              ▼
//!                  RewriteDecision → rewrite URI / redirect / pass
//!                              │
//!                              ▼
//!                        application handler
//! ```

use std::path::PathBuf;

use clap::Parser;
use subrouter::lifecycle::startup::{self, StartupOptions};

#[derive(Parser)]
#[command(name = "subrouter")]
#[command(about = "Locale and subdomain rewrite server", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Reload the configuration file when it changes
    #[arg(short, long)]
    watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    startup::run(StartupOptions {
        config_path: args.config,
        watch: args.watch,
    })
    .await
}
