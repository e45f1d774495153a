//! CORS relay (v1)
//!
//! A single-endpoint forwarding relay built with Tokio, Axum and reqwest.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌───────────────────────────────────────────────┐
//!                        │                  CORS RELAY                   │
//!   Client Request       │  ┌─────────┐   ┌──────────┐   ┌────────────┐  │
//!   ─────────────────────┼─▶│  http   │──▶│  relay   │──▶│  upstream  │──┼──▶ Target
//!   GET /?url=<target>   │  │ server  │   │ handler  │   │   client   │  │    Server
//!                        │  └─────────┘   └──────────┘   └─────┬──────┘  │
//!                        │                                     │         │
//!   Client Response      │  ┌─────────────────────────────┐    │         │
//!   ◀────────────────────┼──│ CORS headers + streamed body│◀───┘         │
//!                        │  └─────────────────────────────┘              │
//!                        │                                               │
//!                        │  config · observability · lifecycle           │
//!                        └───────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use cors_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use cors_relay::lifecycle::{spawn_signal_handler, Shutdown};
use cors_relay::observability::{logging, metrics};
use cors_relay::RelayServer;

#[derive(Parser, Debug)]
#[command(name = "cors-relay")]
#[command(about = "Relay HTTP requests to ?url=<target> with permissive CORS headers", long_about = None)]
struct Args {
    /// Optional TOML configuration file. Without it the relay listens on 0.0.0.0:8080.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

fn resolve_config(args: &Args) -> Result<RelayConfig, ConfigError> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(bind) = &args.bind {
        config.listener.bind_address = bind.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match resolve_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cors-relay: {e}");
            return Err(e.into());
        }
    };

    logging::init_logging(&config.observability);

    tracing::info!("cors-relay v{} starting", env!("CARGO_PKG_VERSION"));

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

    let listener = match TcpListener::bind(&config.listener.bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(
                bind_address = %config.listener.bind_address,
                error = %e,
                "Failed to bind listener"
            );
            return Err(e.into());
        }
    };

    tracing::info!(
        address = %listener.local_addr()?,
        "CORS relay listening"
    );

    let shutdown = Shutdown::new();
    spawn_signal_handler(shutdown.clone());

    let server = RelayServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
