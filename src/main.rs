//! Hookpress site server.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────┐
//!                        │                  HOOKPRESS                    │
//!     Client Request     │  ┌────────┐    ┌──────────┐    ┌───────────┐ │
//!     ───────────────────┼─▶│  http  │───▶│ routing  │───▶│   theme   │ │
//!                        │  │ server │    │ resolve  │    │  context  │ │
//!                        │  └────────┘    └──────────┘    └─────┬─────┘ │
//!                        │                                      │       │
//!                        │              ┌───────────┬───────────┼──────┐│
//!                        │              ▼           ▼           ▼      ││
//!                        │         ┌────────┐ ┌─────────┐ ┌──────────┐ ││
//!                        │         │ hooks  │ │ assets  │ │ markdown │ ││
//!                        │         └────────┘ └────┬────┘ └──────────┘ ││
//!                        │                         │ content-type probe ││
//!     Client Response    │                         ▼                    ││
//!     ◀──────────────────┼──────────────── rendered HTML                ││
//!                        │                                              ││
//!                        │  config (TOML, hot reload) · observability   ││
//!                        └──────────────────────────────────────────────┘│
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use hookpress::config::loader::load_or_default;
use hookpress::config::watcher::ConfigWatcher;
use hookpress::lifecycle::{signals, Shutdown};
use hookpress::observability::{logging, metrics};
use hookpress::HttpServer;

#[derive(Parser)]
#[command(name = "hookpress")]
#[command(about = "Serve a themed, file-based site", long_about = None)]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "hookpress.toml")]
    config: PathBuf,

    /// Do not watch the configuration file for changes.
    #[arg(long)]
    no_reload: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = load_or_default(&args.config)?;
    logging::init(&config.observability);

    tracing::info!("hookpress v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        theme = %config.site.theme,
        themes_dir = %config.paths.themes_dir,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        } else {
            tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            );
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let (watcher, config_updates) = ConfigWatcher::new(&args.config);

    // Keep the watcher alive for the lifetime of the server.
    let _watcher = if args.no_reload || !args.config.exists() {
        None
    } else {
        match watcher.run() {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "Config hot reload disabled");
                None
            }
        }
    };

    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    let server_task = tokio::spawn(server.run(listener, config_updates, server_shutdown));

    signals::wait_for_shutdown(&shutdown).await;
    server_task.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
