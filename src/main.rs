//! bid-hub server entry point.
//!
//! Loads configuration, initializes tracing and serves the bid WebSocket
//! endpoint until Ctrl-C or SIGTERM.

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use bid_hub::config::{HubConfig, LogFormat};
use bid_hub::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = HubConfig::from_env().context("loading configuration")?;

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
    tracing::info!(addr = %config.listen_addr, "starting bid-hub");

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;

    server::serve(listener, &config, shutdown_signal())
        .await
        .context("serving bid endpoint")?;

    tracing::info!("bid-hub stopped");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = terminate.recv() => {},
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "SIGTERM handler unavailable");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
