//! Server setup and lifecycle management

use crate::api::{create_router, AppState};
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use crate::scan::ScanService;
use crate::storage::{self, ChannelStore};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use wavematch_types::ScanEventEnvelope;

/// Wavematch daemon server
pub struct Server {
    config: DaemonConfig,
    store: Arc<dyn ChannelStore>,
    scans: Arc<ScanService>,
    event_tx: broadcast::Sender<ScanEventEnvelope>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        if config.server.event_buffer == 0 {
            return Err(DaemonError::Config(
                "server.event_buffer must be at least 1".to_string(),
            ));
        }

        let store = storage::from_config(&config.storage);

        // Create event channel
        let (event_tx, _) = broadcast::channel(config.server.event_buffer);

        let scans = Arc::new(ScanService::new(
            store.clone(),
            event_tx.clone(),
            config.matching_params(),
        ));

        Ok(Self {
            config,
            store,
            scans,
            event_tx,
        })
    }

    /// The application with all routes and middleware
    pub fn router(&self) -> Router {
        let state = AppState::new(self.store.clone(), self.scans.clone(), self.event_tx.clone());
        create_router(state, &self.config.server)
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;
        let app = self.router();

        // Create listener
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Wavematch daemon listening on {}", addr);

        // Run server with graceful shutdown
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()))?;

        tracing::info!("Wavematch daemon shutting down");

        Ok(())
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
