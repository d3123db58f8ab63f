//! Agora REST API entry point.
//!
//! Binary name: `agora`
//!
//! Parses CLI arguments, wires the conversation engine to its file-backed
//! infrastructure, spawns the background turn scheduler and the config
//! watcher, then serves the REST API until Ctrl+C or SIGTERM.

mod http;
mod state;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use agora_core::agent::Pacing;
use state::{AppState, ConcreteScheduler};

#[derive(Parser)]
#[command(name = "agora", about = "Multi-agent conversation engine", version)]
struct Cli {
    /// Address to bind.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on.
    #[arg(long, default_value_t = 8000)]
    port: u16,

    /// Data directory (config, conversation journal and snapshot).
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Increase log verbosity (-v: debug, -vv: trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log errors only.
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "info",
        1 => "info,agora=debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    let state = AppState::init(&cli.data_dir).await?;

    // Config hot reload. The handle must stay alive for the watcher to run.
    let _config_watcher = match agora_infra::config::watch_config(
        Arc::clone(&state.config),
        &cli.data_dir,
        Duration::from_millis(500),
    ) {
        Ok(watcher) => Some(watcher),
        Err(err) => {
            tracing::warn!("config watcher unavailable: {err}, edits need a restart");
            None
        }
    };

    // Background turn scheduler, stopped via the cancellation token.
    let cancel = CancellationToken::new();
    let scheduler = ConcreteScheduler::new(
        Arc::clone(&state.engine),
        Arc::clone(&state.config),
        cancel.clone(),
        Pacing::default(),
    );
    let scheduler_handle = tokio::spawn(scheduler.run());

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("agora listening on http://{addr}");

    let router = http::router::build_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let the in-flight agent turn finish before exiting.
    cancel.cancel();
    scheduler_handle.await?;
    tracing::info!("shutdown complete");

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
