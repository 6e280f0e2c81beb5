//! Axum HTTP server for the gateway.

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Run `app` on a pre-bound listener until `cancel` fires.
///
/// Returns `Ok(())` on clean shutdown, or an error if the server fails.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("MindBridge listening on {addr}");
    info!("Point OpenAI-compatible clients at: http://{addr}/v1");

    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("MindBridge server shut down");
    Ok(())
}
