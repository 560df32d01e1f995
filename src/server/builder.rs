//! ServerBuilder for fluent API to build HTTP servers

use super::exposure::{GraphQLExposure, RestExposure};
use super::host::ServerHost;
use crate::core::store::{SharedStore, SocialStore};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Builder for the GraphQL server
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .with_store(InMemoryStore::new())
///     .with_playground(false)
///     .serve("127.0.0.1:8080")
///     .await?;
/// ```
pub struct ServerBuilder {
    store: Option<SharedStore>,
    playground: bool,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            playground: true,
            custom_routes: Vec::new(),
        }
    }

    /// Set the store (required)
    pub fn with_store(mut self, store: impl SocialStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    /// Set an already shared store handle (required unless `with_store` is used)
    pub fn with_shared_store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Enable or disable the GraphQL playground (enabled by default)
    pub fn with_playground(mut self, enabled: bool) -> Self {
        self.playground = enabled;
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the transport-agnostic host
    pub fn build_host(&mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow::anyhow!("A store is required. Call .with_store()"))?;

        Ok(ServerHost::new(store)?.with_playground(self.playground))
    }

    /// Build the router for an existing host
    ///
    /// Merges the REST health routes, custom routes and the GraphQL endpoints,
    /// with request tracing on every route.
    pub fn router(&mut self, host: Arc<ServerHost>) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let rest_router = RestExposure::build_router(custom_routes)?;
        let graphql_router = GraphQLExposure::build_router(host)?;

        Ok(rest_router
            .merge(graphql_router)
            .layer(TraceLayer::new_for_http()))
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let host = Arc::new(self.build_host()?);
        self.router(host)
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    /// - Release the store once the server has stopped
    pub async fn serve(mut self, addr: &str) -> Result<()> {
        let host = Arc::new(self.build_host()?);
        let app = self.router(host.clone())?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        host.shutdown().await;
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
            tracing::error!("failed to listen for Ctrl+C: {}", e);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;

    #[test]
    fn test_build_without_store_fails() {
        let result = ServerBuilder::new().build();
        assert!(result.is_err(), "build without a store should fail");
    }

    #[test]
    fn test_build_with_store_succeeds() {
        let result = ServerBuilder::new()
            .with_store(InMemoryStore::new())
            .with_custom_routes(Router::new())
            .build();
        assert!(result.is_ok());
    }

    #[test]
    fn test_playground_flag_reaches_host() {
        let host = ServerBuilder::new()
            .with_store(InMemoryStore::new())
            .with_playground(false)
            .build_host()
            .unwrap();
        assert!(!host.playground);
    }
}
