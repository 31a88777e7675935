//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::catalog::{CatalogEntity, CatalogStore, EntityKind};
use crate::domain::storage::EntityStore;
use crate::domain::DomainError;
use crate::infrastructure::relation::{InMemoryLinkStore, PostgresLinkStore};

use super::in_memory::InMemoryEntityStore;
use super::postgres::{PostgresConfig, PostgresEntityStore};

/// Supported storage backends
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageType {
    InMemory,
    Postgres,
}

impl StorageType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    InMemory,
    Postgres(PostgresConfig),
}

impl StorageConfig {
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    pub fn postgres(config: PostgresConfig) -> Self {
        Self::Postgres(config)
    }

    pub fn postgres_url(url: impl Into<String>) -> Self {
        Self::Postgres(PostgresConfig::new(url))
    }

    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres(_) => StorageType::Postgres,
        }
    }
}

/// Builds the catalog's entity and link stores
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Creates a catalog store on the configured backend
    pub async fn create_catalog(config: &StorageConfig) -> Result<CatalogStore, DomainError> {
        match config {
            StorageConfig::InMemory => {
                info!("Using in-memory catalog storage");
                Ok(Self::in_memory_catalog())
            }
            StorageConfig::Postgres(pg_config) => {
                info!(max_connections = pg_config.max_connections, "Using PostgreSQL catalog storage");
                let pool = pg_config.connect().await?;
                Self::postgres_catalog(pool).await
            }
        }
    }

    /// Creates an empty catalog store held in memory
    pub fn in_memory_catalog() -> CatalogStore {
        CatalogStore {
            categories: Arc::new(InMemoryEntityStore::new()),
            countries: Arc::new(InMemoryEntityStore::new()),
            culinary_cultures: Arc::new(InMemoryEntityStore::new()),
            products: Arc::new(InMemoryEntityStore::new()),
            recipes: Arc::new(InMemoryEntityStore::new()),
            restaurants: Arc::new(InMemoryEntityStore::new()),
            links: Arc::new(InMemoryLinkStore::new()),
        }
    }

    /// Creates a catalog store over an existing pool, ensuring every table
    pub async fn postgres_catalog(pool: PgPool) -> Result<CatalogStore, DomainError> {
        let links = PostgresLinkStore::new(pool.clone());
        links.ensure_table().await?;

        Ok(CatalogStore {
            categories: Self::postgres_store(&pool).await?,
            countries: Self::postgres_store(&pool).await?,
            culinary_cultures: Self::postgres_store(&pool).await?,
            products: Self::postgres_store(&pool).await?,
            recipes: Self::postgres_store(&pool).await?,
            restaurants: Self::postgres_store(&pool).await?,
            links: Arc::new(links),
        })
    }

    async fn postgres_store<E>(pool: &PgPool) -> Result<Arc<dyn EntityStore<E>>, DomainError>
    where
        E: CatalogEntity,
    {
        let store = PostgresEntityStore::<E>::new(pool.clone(), Self::table_name(E::KIND));
        store.ensure_table().await?;
        Ok(Arc::new(store))
    }

    fn table_name(kind: EntityKind) -> String {
        format!("catalog_{}", kind.table_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{Category, EntityId};

    #[test]
    fn test_storage_type_parse() {
        assert_eq!(StorageType::parse("memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("in-memory"), Some(StorageType::InMemory));
        assert_eq!(StorageType::parse("Postgres"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("pg"), Some(StorageType::Postgres));
        assert_eq!(StorageType::parse("sqlite"), None);
    }

    #[test]
    fn test_storage_config_types() {
        assert_eq!(
            StorageConfig::in_memory().storage_type(),
            StorageType::InMemory
        );
        assert_eq!(
            StorageConfig::postgres_url("postgres://localhost/test").storage_type(),
            StorageType::Postgres
        );
    }

    #[test]
    fn test_table_names() {
        assert_eq!(
            StorageFactory::table_name(EntityKind::CulinaryCulture),
            "catalog_culinary_cultures"
        );
    }

    #[tokio::test]
    async fn test_create_in_memory_catalog() {
        let catalog = StorageFactory::create_catalog(&StorageConfig::in_memory())
            .await
            .unwrap();

        let category = Category {
            id: EntityId::new("1").unwrap(),
            name: "Grains".to_string(),
        };
        catalog.save(category.clone()).await.unwrap();

        let found = catalog
            .find_by_id::<Category>(&EntityId::new("1").unwrap())
            .await
            .unwrap();
        assert_eq!(found, Some(category));
    }
}
