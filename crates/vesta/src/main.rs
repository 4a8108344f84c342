//! # vesta-check
//!
//! Loads the layered configuration, builds the cache services and checks
//! that Redis answers. Exits non-zero on any failure, which makes it usable
//! as a deployment readiness probe.

use tracing::{error, info};
use vesta::{CacheServices, ConfigLoader, DatabaseId, VestaResult, XmlRepository};
use vesta_core::telemetry::init_tracing;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Check failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> VestaResult<()> {
    let loader = ConfigLoader::from_default_location()?;
    let config = loader.get().await;
    init_tracing(&config.telemetry)?;

    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Environment: {}", config.app.environment);
    info!("Configuration directory: {}", loader.config_dir());

    // Warnings from loading ran before the subscriber was installed.
    ConfigLoader::check_config(&config);

    let services = CacheServices::from_config(&config)?;
    services.ping().await?;

    let keys = services.cache.search_keys("*", DatabaseId::DEFAULT).await?;
    info!(count = keys.len(), "Keys in default database");

    if let Some(repository) = services.key_management.xml_repository() {
        let elements = repository.get_all_elements().await?;
        info!(count = elements.len(), "Data-protection keys");
    }

    info!("Redis is reachable");
    Ok(())
}
