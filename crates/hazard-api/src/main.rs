use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use hazard_api::{app, AppState};
use hazard_core::{ServiceConfig, TriggerSource};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hazard-api", about = "Landslide hazard risk service")]
struct Args {
    /// JSON config file; defaults apply when omitted.
    #[arg(short, long, env = "HAZARD_CONFIG")]
    config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8000.
    #[arg(short, long, env = "HAZARD_BIND")]
    bind: Option<String>,

    /// Seed for the placeholder susceptibility and trigger fields.
    #[arg(long, env = "HAZARD_SEED")]
    seed: Option<u64>,

    /// Trigger provider: random or noise.
    #[arg(long, env = "HAZARD_TRIGGER")]
    trigger: Option<TriggerSource>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let mut config = ServiceConfig::load_or_default(args.config.as_deref())
        .with_context(|| format!("loading config {:?}", args.config))?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(trigger) = args.trigger {
        config.trigger = trigger;
    }

    let addr: SocketAddr = config
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.bind))?;

    tracing::info!(
        cells = config.grid.cell_count(),
        trigger = %config.trigger,
        seed = config.seed,
        "building risk grid"
    );
    let state = AppState::from_config(config).context("initialising risk state")?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Hazard API listening on {}", addr);

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
