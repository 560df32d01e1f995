//! socialgraph server binary
//!
//! Reads the YAML file named by `SOCIALGRAPH_CONFIG` (defaults otherwise),
//! opens the configured store and serves the GraphQL API until SIGINT/SIGTERM.

use anyhow::Result;
use socialgraph::config::AppConfig;
use socialgraph::server::ServerBuilder;
use socialgraph::storage;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log.filter))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let store = storage::open(&config.storage).await?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_playground(config.server.playground)
        .serve(&config.bind_address())
        .await
}
