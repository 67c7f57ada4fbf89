mod config;
mod error;
mod http;
mod metrics;
mod poller;
mod state;
mod upstream;

use crate::config::Config;
use crate::http::server::HttpServer;
use crate::metrics::registry::MetricsRegistry;
use crate::poller::Poller;
use crate::upstream::UpstreamClient;
use clap::Parser;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "grouplag-exporter")]
#[command(about = "Exports consumer group lag and state from an upstream HTTP API as Prometheus gauges")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); overrides config verbosity
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = Config::load(Some(&args.config))?;

    let level = args.log_level.as_deref().unwrap_or(if config.exporter.verbose {
        "debug"
    } else {
        "info"
    });
    init_logging(level);

    info!("Starting grouplag-exporter");
    info!(
        poll_interval = ?config.exporter.poll_interval,
        upstream = %config.upstream.url,
        http_port = config.exporter.http_port,
        "Configuration loaded"
    );

    // Shared gauge store between the poller and the HTTP server
    let registry = Arc::new(MetricsRegistry::new());

    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let client = UpstreamClient::new(&config.upstream)?;
    let poller = Poller::new(
        client,
        Arc::clone(&registry),
        config.exporter.poll_interval,
    );
    let poller_handle = tokio::spawn(poller.run(shutdown_tx.subscribe()));

    let http_server = HttpServer::new(
        &config.exporter.http_host,
        config.exporter.http_port,
        Arc::clone(&registry),
    )?;

    // Broadcast shutdown on SIGINT/SIGTERM
    let signal_tx = shutdown_tx.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        info!("Shutdown signal received, stopping...");
        let _ = signal_tx.send(());
    });

    // The server runs in the foreground; a bind failure is fatal
    http_server.run(shutdown_tx.subscribe()).await?;

    let _ = shutdown_tx.send(());
    match tokio::time::timeout(Duration::from_secs(10), poller_handle).await {
        Ok(_) => info!("Poll loop stopped"),
        Err(_) => error!("Timeout waiting for poll loop to stop"),
    }

    info!("grouplag-exporter stopped");
    Ok(())
}

fn init_logging(level: &str) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
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
