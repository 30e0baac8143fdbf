//! ServerBuilder for fluent API to build the directory server

use super::handlers::AppState;
use super::router::build_router;
use crate::config::DirectoryConfig;
use crate::storage::{EmployeeDirectory, loader};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the directory HTTP server
///
/// Startup has two phases: the dataset is loaded first, and only then is the
/// router built and the listener bound, so no request is served before the
/// data is in memory.
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_config(config)
///     .load_dataset()
///     .await
///     .serve()
///     .await?;
/// ```
pub struct ServerBuilder {
    config: DirectoryConfig,
    directory: Option<Arc<EmployeeDirectory>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: DirectoryConfig::default(),
            directory: None,
        }
    }

    pub fn with_config(mut self, config: DirectoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Use an already built directory instead of loading one
    pub fn with_directory(mut self, directory: EmployeeDirectory) -> Self {
        self.directory = Some(Arc::new(directory));
        self
    }

    /// Load the dataset named by the configuration
    ///
    /// A dataset that cannot be read or parsed is logged and replaced by an
    /// empty directory; loading never fails the startup.
    pub async fn load_dataset(mut self) -> Self {
        let dataset = loader::load_async(&self.config.data.path).await;
        self.directory = Some(Arc::new(EmployeeDirectory::from_dataset(dataset)));
        self
    }

    /// Build the application router
    pub fn build(&self) -> Result<Router> {
        let directory = self.directory.clone().ok_or_else(|| {
            anyhow::anyhow!(
                "EmployeeDirectory is required. Call .load_dataset() or .with_directory()"
            )
        })?;

        let state = AppState {
            directory,
            query: self.config.query.clone(),
        };

        Ok(build_router(state, self.config.static_dir.as_deref()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to the configured address and handles SIGTERM and SIGINT
    /// (Ctrl+C) for graceful shutdown.
    pub async fn serve(self) -> Result<()> {
        let app = self.build()?;
        let addr = self.config.server.address();
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
