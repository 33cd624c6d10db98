//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "postgres")]
pub mod postgres;

pub use in_memory::InMemoryInvoiceStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresInvoiceStore;

use crate::config::{StorageBackend, StorageConfig};
use crate::core::store::InvoiceStore;
use anyhow::Result;
use std::sync::Arc;

/// Open the store selected by the configuration
pub async fn open(config: &StorageConfig) -> Result<Arc<dyn InvoiceStore>> {
    match config.backend {
        StorageBackend::Memory => {
            tracing::info!("Using in-memory invoice store");
            Ok(Arc::new(InMemoryInvoiceStore::new()))
        }
        StorageBackend::Postgres => open_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn open_postgres(config: &StorageConfig) -> Result<Arc<dyn InvoiceStore>> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("storage.database_url is not set"))?;

    let pool = postgres::connect(url, config.max_connections).await?;
    tracing::info!(max_connections = config.max_connections, "Connected to PostgreSQL");
    Ok(Arc::new(PostgresInvoiceStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_config: &StorageConfig) -> Result<Arc<dyn InvoiceStore>> {
    anyhow::bail!("storage backend 'postgres' requires the `postgres` feature")
}
