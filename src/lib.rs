//! Culinary Catalog API
//!
//! Catalog of countries, culinary cultures, products, recipes and restaurants
//! with:
//! - Typed many-to-many and one-to-many associations between entities
//! - Read-through caching of collection reads (in-memory or Redis)
//! - In-memory or PostgreSQL storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use api::state::AppState;
use infrastructure::cache::CacheFactory;
use infrastructure::catalog::CatalogServices;
use infrastructure::storage::StorageFactory;
use tracing::info;

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let services = create_catalog_services(config).await?;
    Ok(AppState::new(services))
}

/// Connects the configured store and cache and wires every catalog service
pub async fn create_catalog_services(config: &AppConfig) -> anyhow::Result<CatalogServices> {
    let storage_config = config.storage.to_storage_config()?;
    info!(backend = ?storage_config.storage_type(), "Initializing catalog storage");
    let store = StorageFactory::create_catalog(&storage_config).await?;

    let cache_config = config.cache.to_cache_config()?;
    info!(backend = %cache_config.cache_type, ttl = ?cache_config.ttl, "Initializing read cache");
    let cache = CacheFactory::new().create(&cache_config).await?;

    Ok(CatalogServices::new(
        store,
        cache,
        config.cache.read_settings()?,
    ))
}
