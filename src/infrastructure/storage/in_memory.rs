//! In-memory entity store

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{EntityStore, StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug)]
struct Slots<E> {
    entities: HashMap<String, (u64, E)>,
    next: u64,
}

/// Thread-safe in-memory entity store
///
/// `find_all` returns entities in insertion order. Data is lost when the
/// process terminates.
#[derive(Debug)]
pub struct InMemoryEntityStore<E>
where
    E: StorageEntity,
{
    slots: RwLock<Slots<E>>,
}

impl<E> Default for InMemoryEntityStore<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryEntityStore<E>
where
    E: StorageEntity,
{
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(Slots {
                entities: HashMap::new(),
                next: 0,
            }),
        }
    }

    /// Creates a store pre-populated with entities
    pub fn with_entities(entities: Vec<E>) -> Self {
        let store = Self::new();
        if let Ok(mut slots) = store.slots.write() {
            for entity in entities {
                let position = slots.next;
                slots.next += 1;
                slots
                    .entities
                    .insert(entity.key().as_str().to_string(), (position, entity));
            }
        }
        store
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Slots<E>>, DomainError> {
        self.slots
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Slots<E>>, DomainError> {
        self.slots
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl<E> EntityStore<E> for InMemoryEntityStore<E>
where
    E: StorageEntity + 'static,
{
    async fn find_by_id(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let slots = self.read()?;
        Ok(slots.entities.get(key.as_str()).map(|(_, e)| e.clone()))
    }

    async fn find_all(&self) -> Result<Vec<E>, DomainError> {
        let slots = self.read()?;
        let mut entries: Vec<&(u64, E)> = slots.entities.values().collect();
        entries.sort_by_key(|(position, _)| *position);

        Ok(entries.into_iter().map(|(_, e)| e.clone()).collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut slots = self.write()?;

        if slots.entities.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        let position = slots.next;
        slots.next += 1;
        slots.entities.insert(key, (position, entity.clone()));
        Ok(entity)
    }

    async fn update(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut slots = self.write()?;

        match slots.entities.get_mut(&key) {
            Some(slot) => {
                slot.1 = entity.clone();
                Ok(entity)
            }
            None => Err(DomainError::not_found(format!(
                "Entity with key '{}' not found",
                key
            ))),
        }
    }

    async fn save(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().as_str().to_string();
        let mut slots = self.write()?;

        if let Some(slot) = slots.entities.get_mut(&key) {
            slot.1 = entity.clone();
        } else {
            let position = slots.next;
            slots.next += 1;
            slots.entities.insert(key, (position, entity.clone()));
        }

        Ok(entity)
    }

    async fn remove(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut slots = self.write()?;
        Ok(slots.entities.remove(key.as_str()).is_some())
    }

    async fn exists(&self, key: &E::Key) -> Result<bool, DomainError> {
        Ok(self.read()?.entities.contains_key(key.as_str()))
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.read()?.entities.len())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.write()?.entities.clear();
        Ok(())
    }
}
