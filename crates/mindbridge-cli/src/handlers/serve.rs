//! Serve command handler.

use anyhow::{Context, Result};
use mindbridge_proxy::{ProxyConfig, create_router, serve};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::bootstrap::CliContext;

/// Bind the listener and run the gateway until Ctrl-C.
pub async fn execute(ctx: &CliContext, config: ProxyConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;

    let app = create_router(ctx.dispatcher.clone(), &config);

    let cancel = CancellationToken::new();
    let shutdown = cancel.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Shutdown signal received"),
            Err(e) => warn!(error = %e, "Failed to listen for Ctrl-C; shutting down"),
        }
        shutdown.cancel();
    });

    serve(listener, app, cancel).await
}
