use anyhow::Result;
use invoice::config::AppConfig;
use invoice::server::ServerBuilder;
use invoice::{storage, telemetry};
use std::path::PathBuf;

/// Config path from the first argument, else `INVOICE_CONFIG`
fn config_path() -> Option<PathBuf> {
    std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var_os("INVOICE_CONFIG").map(PathBuf::from))
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load(config_path().as_deref())?;
    telemetry::init_tracing(&config.logging)?;

    tracing::info!(
        backend = ?config.storage.backend,
        reduction_percent = %config.pricing.reduction_percent,
        "Starting invoice service"
    );

    let store = storage::open(&config.storage).await?;

    ServerBuilder::new()
        .with_shared_store(store)
        .with_config(&config)
        .serve(&config.server.bind_addr.to_string())
        .await
}
