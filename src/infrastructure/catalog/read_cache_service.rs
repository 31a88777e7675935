//! Read-through caching of collection reads

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::cache::{Cache, CacheExt, CacheKeys};
use crate::domain::catalog::{CatalogEntity, CatalogStore, EntityId, PublicShape};
use crate::domain::relation::Relation;
use crate::domain::DomainError;

use super::association_service::AssociationService;

/// Stores `value` under `key`; a failed write is logged and swallowed
async fn store_quietly<V>(cache: &dyn Cache, key: &str, value: &V, ttl: Option<Duration>)
where
    V: serde::Serialize + Send + Sync,
{
    if let Err(e) = cache.set(key, value, ttl).await {
        warn!(key = %key, error = %e, "Failed to populate cache");
    }
}

/// Cache-aside `find_all` for entity type `E`
///
/// The first read populates one fixed key; every later read is served from
/// the cache until the entry is evicted or expires. Writes never invalidate.
#[derive(Debug)]
pub struct ReadCacheService<E: PublicShape> {
    catalog: CatalogStore,
    cache: Arc<dyn Cache>,
    key: String,
    ttl: Option<Duration>,
    _entity: std::marker::PhantomData<fn() -> E>,
}

impl<E: PublicShape> ReadCacheService<E> {
    pub fn new(catalog: CatalogStore, cache: Arc<dyn Cache>, keys: &CacheKeys) -> Self {
        Self {
            catalog,
            cache,
            key: keys.collection(E::CACHE_KEY),
            ttl: None,
            _entity: std::marker::PhantomData,
        }
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn find_all(&self) -> Result<Vec<E::View>, DomainError> {
        if let Some(views) = self.cache.get::<Vec<E::View>>(&self.key).await? {
            debug!(key = %self.key, count = views.len(), "Cache hit");
            return Ok(views);
        }

        debug!(key = %self.key, "Cache miss");
        let views = self.catalog.find_all_views::<E>().await?;
        store_quietly(self.cache.as_ref(), &self.key, &views, self.ttl).await;

        Ok(views)
    }
}

/// Cache-aside `find_all_for_owner` for relation `R`, keyed per owner
#[derive(Debug)]
pub struct OwnerReadCacheService<R: Relation> {
    associations: Arc<AssociationService<R>>,
    cache: Arc<dyn Cache>,
    keys: CacheKeys,
    ttl: Option<Duration>,
}

impl<R: Relation> OwnerReadCacheService<R> {
    pub fn new(
        associations: Arc<AssociationService<R>>,
        cache: Arc<dyn Cache>,
        keys: CacheKeys,
    ) -> Self {
        Self {
            associations,
            cache,
            keys,
            ttl: None,
        }
    }

    pub fn with_ttl(mut self, ttl: Option<Duration>) -> Self {
        self.ttl = ttl;
        self
    }

    /// e.g. `culinaryCulture_42_restaurants`
    pub fn key_for(&self, owner_id: &EntityId) -> String {
        self.keys.owner_relation(
            R::Owner::KIND.cache_prefix(),
            owner_id.as_str(),
            R::FIELD,
        )
    }

    pub async fn find_all_for_owner(
        &self,
        owner_id: &EntityId,
    ) -> Result<Vec<R::Member>, DomainError> {
        let key = self.key_for(owner_id);

        if let Some(members) = self.cache.get::<Vec<R::Member>>(&key).await? {
            debug!(key = %key, count = members.len(), "Cache hit");
            return Ok(members);
        }

        debug!(key = %key, "Cache miss");
        let members = self.associations.find_all_for_owner(owner_id).await?;
        store_quietly(self.cache.as_ref(), &key, &members, self.ttl).await;

        Ok(members)
    }
}
