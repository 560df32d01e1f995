//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;

use crate::config::StorageConfig;
use crate::core::store::SharedStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the store selected by `config`
///
/// The returned handle is owned by the server process and released with
/// [`SocialStore::close`](crate::core::store::SocialStore::close) at shutdown.
pub async fn open(config: &StorageConfig) -> Result<SharedStore> {
    match config {
        StorageConfig::InMemory => {
            tracing::info!("Using in-memory store");
            Ok(Arc::new(InMemoryStore::new()))
        }
        #[cfg(feature = "postgres")]
        StorageConfig::Postgres {
            url,
            max_connections,
        } => {
            tracing::info!(max_connections, "Connecting to PostgreSQL");
            Ok(Arc::new(PostgresStore::connect(url, *max_connections).await?))
        }
        #[cfg(not(feature = "postgres"))]
        StorageConfig::Postgres { .. } => anyhow::bail!(
            "PostgreSQL storage is not enabled. Enable the 'postgres' feature to use it."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_open_in_memory() {
        let store = open(&StorageConfig::InMemory).await.unwrap();
        assert!(store.get_user(1).await.unwrap().is_none());
    }

    #[cfg(not(feature = "postgres"))]
    #[tokio::test]
    async fn test_open_postgres_without_feature_fails() {
        let config = StorageConfig::Postgres {
            url: "postgres://localhost/social".to_string(),
            max_connections: 1,
        };
        assert!(open(&config).await.is_err());
    }
}
