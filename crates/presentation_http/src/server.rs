//! Server loop with bounded graceful shutdown

use std::time::Duration;

use axum::Router;
use tokio::{net::TcpListener, sync::watch};
use tracing::{info, warn};

/// Serve `app` until `shutdown` resolves, then drain open connections
///
/// Connections still open after `drain_timeout` are dropped.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    shutdown: impl Future<Output = ()> + Send + 'static,
    drain_timeout: Duration,
) -> std::io::Result<()> {
    let (tx, mut rx) = watch::channel(false);
    let signal = async move {
        shutdown.await;
        let _ = tx.send(true);
    };

    let server = axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .into_future();
    tokio::pin!(server);

    tokio::select! {
        result = &mut server => return result,
        _ = rx.changed() => {},
    }

    info!("Waiting up to {:?} for connections to close...", drain_timeout);
    if let Ok(result) = tokio::time::timeout(drain_timeout, server).await {
        result
    } else {
        warn!(
            timeout_secs = drain_timeout.as_secs(),
            "Connections still open after shutdown timeout, closing"
        );
        Ok(())
    }
}
