//! Image gateway binary.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌──────────────────────────────────────────────┐
//!                   │                IMAGE GATEWAY                  │
//!                   │                                               │
//!   Client Request  │  ┌────────┐   ┌─────────┐   ┌────────────┐  │
//!   ────────────────┼─▶│  http  │──▶│ routing │──▶│  rewrite   │  │
//!                   │  │ server │   │  table  │   │  + invert  │  │
//!                   │  └────────┘   └─────────┘   └─────┬──────┘  │
//!                   │                                    │         │
//!                   │                                    ▼         │
//!                   │                            ┌────────────┐   │
//!                   │                            │ allowlist  │   │
//!                   │                            └─────┬──────┘   │
//!                   │                                    │         │
//!   Client Response │  ┌────────┐   ┌─────────┐   ┌─────▼──────┐  │
//!   ◀───────────────┼──│ header │◀──│ stream  │◀──│  outbound  │◀─┼── imgproxy /
//!                   │  │rewrite │   │  body   │   │   fetch    │  │   origin
//!                   │  └────────┘   └─────────┘   └────────────┘  │
//!                   └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use image_gateway::config;
use image_gateway::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "image-gateway", about = "Image CDN gateway and transformation proxy")]
struct Args {
    /// Path to a TOML configuration file. Environment variables override
    /// file values; without a file, defaults plus environment apply.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "image_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("image-gateway v0.1.0 starting");

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => config::load_config(path)?,
        None => config::load_from_env()?,
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        backend = %config.upstream.base_url,
        allowlist = ?config.allowlist.domains,
        rewrite_rules = config.rewrite_rules().len(),
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
