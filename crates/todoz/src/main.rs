//! # Todoz Binary
//!
//! Startup only: parse flags, layer configuration, install logging, open the
//! data directory, and serve until Ctrl+C or SIGTERM. Everything else lives in
//! the library half of this crate and in `todoapp`.
//!
//! ## Configuration
//!
//! Highest priority first:
//! - Flags: `--data-dir`, `--listen`, `--config`
//! - Environment: `TODOZ_DATA_DIR`, `TODOZ_LISTEN`, `TODOZ_LOG`
//! - TOML file: `--config FILE`, else `./todoz.toml` when present
//! - Compiled defaults
//!
//! `RUST_LOG`, when set, replaces the configured log filter.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use todoapp::config::{TodoConfig, DEFAULT_CONFIG_FILE};
use todoapp::store::fs::FileStore;
use todoapp::store::SnapshotStore;
use todoz::args::Cli;
use todoz::http::{router, AppState};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_tracing(&config.log_filter);

    let data_dir = config.data_dir()?;
    tracing::info!(data_dir = %data_dir.display(), "using data directory");
    let store: Arc<dyn SnapshotStore> = Arc::new(FileStore::new(data_dir));
    let state = AppState::new(store);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;
    runtime.block_on(serve(&config.listen, state))
}

fn load_config(cli: &Cli) -> Result<TodoConfig> {
    let file = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("config file not found: {}", path.display());
            }
            Some(path.clone())
        }
        None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.exists()),
    };

    let mut config = TodoConfig::load(file.as_deref()).context("failed to load configuration")?;
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(listen) = &cli.listen {
        config.listen = listen.clone();
    }
    Ok(config)
}

fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(listen: &str, state: AppState) -> Result<()> {
    let listener = TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {}", listen))?;

    match listener.local_addr() {
        Ok(address) => tracing::info!(%address, "listening"),
        Err(error) => tracing::warn!(%error, "could not determine local address"),
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C, shutting down"),
        () = terminate => tracing::info!("received SIGTERM, shutting down"),
    }
}
