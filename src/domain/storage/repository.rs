//! Entity store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::DomainError;

use super::entity::{StorageEntity, StorageKey};

/// Generic persistence collaborator for a single entity type
#[async_trait]
pub trait EntityStore<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Looks an entity up by its key
    async fn find_by_id(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Returns every stored entity
    async fn find_all(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new entity, failing with `Conflict` if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Overwrites an existing entity, failing with `NotFound` if absent
    async fn update(&self, entity: E) -> Result<E, DomainError>;

    /// Upsert
    async fn save(&self, entity: E) -> Result<E, DomainError> {
        if self.exists(entity.key()).await? {
            self.update(entity).await
        } else {
            self.create(entity).await
        }
    }

    /// Removes an entity, returning whether it existed
    async fn remove(&self, key: &E::Key) -> Result<bool, DomainError>;

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.find_by_id(key).await?.is_some())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.find_all().await?.len())
    }

    /// Drops every entity (tests and seeding)
    async fn clear(&self) -> Result<(), DomainError>;
}
