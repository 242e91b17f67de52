//! Server startup and binding
//!
//! Provides functionality to start the Axum server with configurable host/port.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use pricegen_core::PriceEngine;
use tokio::net::TcpListener;

use crate::config::{ConfigError, ServerConfig};
use crate::routes::{self, AppState};

/// Server instance that can be started
pub struct Server {
    /// Server configuration
    config: Arc<ServerConfig>,
    /// The built router
    router: Router,
}

impl Server {
    /// Create a server, building the price engine from the configuration
    pub fn new(config: ServerConfig) -> Result<Self, ConfigError> {
        let engine = config.build_engine()?;
        Ok(Self::with_engine(config, engine))
    }

    /// Create a server around an existing engine
    pub fn with_engine(config: ServerConfig, engine: PriceEngine) -> Self {
        let config = Arc::new(config);
        let router = routes::build_router(AppState::new(config.clone(), engine));

        Self { config, router }
    }

    /// Get the socket address the server will bind to
    pub fn socket_addr(&self) -> Result<SocketAddr, std::io::Error> {
        self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Run the server until Ctrl-C
    pub async fn run(self) -> Result<(), std::io::Error> {
        let addr = self.socket_addr()?;
        let listener = TcpListener::bind(addr).await?;

        self.run_with_listener(listener).await
    }

    /// Run the server with a specific listener
    ///
    /// This is useful for testing where you want to use a listener bound to port 0
    /// to get a random available port.
    pub async fn run_with_listener(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
