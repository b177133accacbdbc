//! ServerBuilder for fluent API to build the HTTP shell

use super::handlers::AppState;
use super::router::build_routes;
use crate::config::AppConfig;
use crate::core::BillStore;
use crate::storage::{InMemoryBillStore, fixtures};
use crate::views::Views;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builder for the billed HTTP shell
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::default_config())
///     .with_store(InMemoryBillStore::new("https://localhost:3456/images"))
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn BillStore>>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default_config(),
            store: None,
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the bill store
    ///
    /// Without one, an in-memory store is created from the configuration
    /// (seeded with the demo bills when `bills.seed_fixtures` is set).
    pub fn with_store(mut self, store: impl BillStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Same as [`with_store`](Self::with_store) for a store shared elsewhere
    pub fn with_shared_store(mut self, store: Arc<dyn BillStore>) -> Self {
        self.store = Some(store);
        self
    }

    fn default_store(config: &AppConfig) -> Arc<dyn BillStore> {
        let base_url = config.uploads.base_url.clone();
        if config.bills.seed_fixtures {
            Arc::new(InMemoryBillStore::with_records(base_url, fixtures::bill_records()))
        } else {
            Arc::new(InMemoryBillStore::new(base_url))
        }
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        let store = match self.store {
            Some(store) => store,
            None => Self::default_store(&self.config),
        };

        let state = AppState {
            store,
            views: Arc::new(Views::new()?),
            config: Arc::new(self.config),
        };

        let app = build_routes(state).layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));
        Ok(app)
    }

    /// Serve the application with graceful shutdown
    ///
    /// Listens on `server.address` from the configuration.
    pub async fn serve(self) -> Result<()> {
        let addr = self.config.server.address.clone();
        let app = self.build()?;
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
            tracing::error!("failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("failed to install SIGTERM handler: {}", e);
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
