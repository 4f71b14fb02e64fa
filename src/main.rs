//! Resource router service.
//!
//! # Architecture Overview
//!
//! ```text
//!                      ┌──────────────────────────────────────────────┐
//!                      │               RESOURCE ROUTER                 │
//!                      │                                               │
//!   Client Request     │  ┌─────────┐    ┌────────────┐               │
//!   ───────────────────┼─▶│  http   │───▶│ RouteTable │ (ArcSwap      │
//!                      │  │ server  │    │  snapshot  │  snapshot)    │
//!   JSON Response      │  │         │◀───│            │               │
//!   ◀──────────────────┼──│         │    └─────▲──────┘               │
//!                      │  └─────────┘          │ store()              │
//!                      │                 ┌─────┴──────┐   ┌────────┐  │
//!                      │                 │  config    │◀──│ watcher│  │
//!                      │                 │  loader    │   └────────┘  │
//!                      │                 └────────────┘               │
//!                      │  admin API · metrics · signals · logging     │
//!                      └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use resource_router::config::{load_config, ConfigWatcher};
use resource_router::http::HttpServer;
use resource_router::lifecycle::{signals, Shutdown};
use resource_router::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "resource-router")]
#[command(about = "Serve a route table described by a TOML file", long_about = None)]
struct Args {
    /// Path to the router configuration file.
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Do not reload the route table when the file changes.
    #[arg(long)]
    no_watch: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(&args.config)?;

    logging::init(&config.observability);
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        "resource-router starting"
    );

    tracing::info!(
        bind_address = %config.listener.bind_address,
        routes = config.routes.len(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    // A broken route table is fatal here, before any listener is bound.
    let server = HttpServer::new(config.clone())?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let (watcher, config_updates) = ConfigWatcher::new(&args.config);
    let _watcher = if args.no_watch {
        None
    } else {
        Some(watcher.run()?)
    };

    if config.admin.enabled {
        let admin_listener = TcpListener::bind(&config.admin.bind_address).await?;
        tracing::info!(address = %admin_listener.local_addr()?, "Admin API listening");
        let admin = server.admin_router();
        let mut admin_shutdown = shutdown.subscribe();
        tokio::spawn(async move {
            let result = axum::serve(admin_listener, admin)
                .with_graceful_shutdown(async move { admin_shutdown.recv().await })
                .await;
            if let Err(e) = result {
                tracing::error!(error = %e, "Admin API failed");
            }
        });
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    server.run(listener, config_updates, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
