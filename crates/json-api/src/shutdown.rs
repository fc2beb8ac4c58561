//! Graceful shutdown on Ctrl+C or SIGTERM.

use std::{io, time::Duration};

use salvo::server::ServerHandle;
use thiserror::Error;
use tokio::signal;
use tracing::info;

#[derive(Debug, Error)]
pub(crate) enum ShutdownSignalError {
    #[error("failed to install Ctrl+C handler: {0}")]
    CtrlC(#[source] io::Error),

    #[cfg(unix)]
    #[error("failed to install SIGTERM handler: {0}")]
    SigTerm(#[source] io::Error),
}

/// Wait for a stop signal, then let in-flight requests finish within `grace`.
pub(crate) async fn listen(handle: ServerHandle, grace: Duration) -> Result<(), ShutdownSignalError> {
    let ctrl_c = async { signal::ctrl_c().await.map_err(ShutdownSignalError::CtrlC) };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .map_err(ShutdownSignalError::SigTerm)?
            .recv()
            .await;

        Ok::<(), ShutdownSignalError>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<(), ShutdownSignalError>>();

    tokio::select! {
        result = ctrl_c => {
            result?;
            info!("ctrl_c received, draining requests");
        }
        result = terminate => {
            result?;
            info!("terminate received, draining requests");
        }
    };

    handle.stop_graceful(Some(grace));

    Ok(())
}
