pub mod contact;
pub mod preview;
pub mod rest;
pub mod state;

use axum::Router;
use std::net::SocketAddr;
use tokio::{net::TcpListener, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

// Re-export the router builders to make them easily accessible
// to the binary that starts the listeners.
pub use contact::contact_router;
pub use preview::preview_router;

/// Binds `address` and serves `app` on a background task until `shutdown` is cancelled.
///
/// Returns the bound address (useful when binding port 0) and the task handle.
pub async fn spawn_listener(
    name: &'static str,
    address: SocketAddr,
    app: Router,
    shutdown: CancellationToken,
) -> std::io::Result<(SocketAddr, JoinHandle<()>)> {
    let listener = TcpListener::bind(address).await?;
    let local = listener.local_addr()?;
    info!("Starting {} listener on http://{}", name, local);

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown.cancelled_owned())
            .await
        {
            error!("{} listener stopped: {}", name, e);
        }
    });
    Ok((local, handle))
}
