//! Graceful Shutdown
//!
//! Lets the HTTP server finish in-flight rename requests before exiting.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;

/// Shutdown coordinator shared between the signal handler and the server.
#[derive(Clone)]
pub struct ShutdownController {
    initiated: Arc<AtomicBool>,
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self {
            initiated: Arc::new(AtomicBool::new(false)),
            tx: Arc::new(tx),
        }
    }

    /// Initiate shutdown. Only the first call has an effect.
    pub fn shutdown(&self) {
        if !self.initiated.swap(true, Ordering::SeqCst) {
            tracing::info!("initiating graceful shutdown");
            self.tx.send_replace(true);
        }
    }

    pub fn is_shutdown(&self) -> bool {
        self.initiated.load(Ordering::SeqCst)
    }

    /// Resolves once shutdown has been initiated.
    pub async fn wait(&self) {
        let mut rx = self.tx.subscribe();
        // wait_for checks the current value first, so a late subscriber still wakes
        let _ = rx.wait_for(|stopped| *stopped).await;
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}

/// Install signal handlers and trigger the controller on Ctrl+C or SIGTERM.
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn shutdown_signal(controller: ShutdownController) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("received Ctrl+C, initiating shutdown");
        }
        _ = terminate => {
            tracing::info!("received SIGTERM, initiating shutdown");
        }
    }

    controller.shutdown();
}
