use std::time::Duration;

use serde::Deserialize;

use crate::infrastructure::cache::{CacheConfig, CacheType};
use crate::infrastructure::catalog::ReadCacheSettings;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType};

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Where catalog entities and link rows are persisted
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    pub database_url: Option<String>,
    pub max_connections: u32,
}

/// Backend and staleness bound of the read cache
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    /// `memory` or `redis`
    pub backend: String,
    pub redis_url: Option<String>,
    pub key_prefix: Option<String>,
    /// Entry lifetime in seconds; unset keeps entries until evicted
    pub ttl_secs: Option<u64>,
    pub max_capacity: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            database_url: None,
            max_connections: 10,
        }
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            backend: "memory".to_string(),
            redis_url: None,
            key_prefix: None,
            ttl_secs: None,
            max_capacity: 10_000,
        }
    }
}

impl StorageSettings {
    /// Resolves the storage backend; `DATABASE_URL` fills in a missing URL
    pub fn to_storage_config(&self) -> anyhow::Result<StorageConfig> {
        let backend = StorageType::parse(&self.backend)
            .ok_or_else(|| anyhow::anyhow!("Unknown storage backend: {}", self.backend))?;

        match backend {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self
                    .database_url
                    .clone()
                    .or_else(|| std::env::var("DATABASE_URL").ok())
                    .ok_or_else(|| {
                        anyhow::anyhow!("storage.database_url is required for the postgres backend")
                    })?;

                Ok(StorageConfig::postgres(
                    PostgresConfig::new(url).with_max_connections(self.max_connections),
                ))
            }
        }
    }
}

impl CacheSettings {
    pub fn ttl(&self) -> Option<Duration> {
        self.ttl_secs.map(Duration::from_secs)
    }

    pub fn to_cache_config(&self) -> anyhow::Result<CacheConfig> {
        let cache_type: CacheType = self.backend.parse()?;

        let mut config = CacheConfig {
            cache_type,
            redis_url: self.redis_url.clone(),
            ..CacheConfig::default()
        }
        .with_max_capacity(self.max_capacity);

        if let Some(prefix) = &self.key_prefix {
            config = config.with_key_prefix(prefix.clone());
        }
        if let Some(ttl) = self.ttl() {
            config = config.with_ttl(ttl);
        }

        Ok(config)
    }

    pub fn read_settings(&self) -> anyhow::Result<ReadCacheSettings> {
        let config = self.to_cache_config()?;
        Ok(ReadCacheSettings::new(config.keys()).with_ttl(self.ttl()))
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_in_memory_without_ttl() {
        let config = AppConfig::default();

        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.storage.to_storage_config().unwrap().storage_type(),
            StorageType::InMemory
        );

        let cache = config.cache.to_cache_config().unwrap();
        assert_eq!(cache.cache_type, CacheType::InMemory);
        assert!(cache.ttl.is_none());
        assert!(config.cache.read_settings().unwrap().ttl.is_none());
    }

    #[test]
    fn test_cache_settings_with_prefix_and_ttl() {
        let settings = CacheSettings {
            backend: "redis".to_string(),
            redis_url: Some("redis://localhost:6379".to_string()),
            key_prefix: Some("catalog".to_string()),
            ttl_secs: Some(300),
            ..CacheSettings::default()
        };

        let config = settings.to_cache_config().unwrap();
        assert_eq!(config.cache_type, CacheType::Redis);
        assert_eq!(config.ttl, Some(Duration::from_secs(300)));

        let reads = settings.read_settings().unwrap();
        assert_eq!(reads.keys.collection("recipes"), "catalog:recipes");
    }

    #[test]
    fn test_unknown_backends_are_rejected() {
        let storage = StorageSettings {
            backend: "sqlite".to_string(),
            ..StorageSettings::default()
        };
        assert!(storage.to_storage_config().is_err());

        let cache = CacheSettings {
            backend: "memcached".to_string(),
            ..CacheSettings::default()
        };
        assert!(cache.to_cache_config().is_err());
    }

    #[test]
    fn test_deserialize_partial_config() {
        let config: AppConfig = serde_json::from_value(serde_json::json!({
            "server": { "port": 3000 },
            "logging": { "format": "json" },
            "cache": { "ttl_secs": 60 }
        }))
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(matches!(config.logging.format, LogFormat::Json));
        assert_eq!(config.cache.ttl(), Some(Duration::from_secs(60)));
        assert_eq!(config.storage.backend, "memory");
    }
}
