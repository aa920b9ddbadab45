//! Service entry point.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skymint::{AppConfig, HttpServer};

#[derive(Parser, Debug)]
#[command(name = "skymint", about = "Weather + crypto aggregation API")]
struct Args {
    /// Path to a TOML config file; defaults and env vars apply without it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the bind address from config.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "skymint=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("skymint v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config: AppConfig = skymint::config::load(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.server.bind_address = bind;
    }

    tracing::info!(
        bind_address = %config.server.bind_address,
        cache_ttl_secs = config.cache.ttl_secs,
        outbound_timeout_ms = config.outbound.timeout_ms,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    let server = HttpServer::new(&config)?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
