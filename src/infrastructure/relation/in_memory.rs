//! In-memory link store

use std::sync::RwLock;

use async_trait::async_trait;

use super::rows_to_write;
use crate::domain::catalog::{EntityId, EntityKind};
use crate::domain::relation::{Cardinality, JoinTable, LinkSide, LinkStore};
use crate::domain::DomainError;

#[derive(Debug, Clone, PartialEq, Eq)]
struct LinkRow {
    table: JoinTable,
    left: EntityId,
    right: EntityId,
}

impl LinkRow {
    fn column(&self, side: LinkSide) -> &EntityId {
        match side {
            LinkSide::Left => &self.left,
            LinkSide::Right => &self.right,
        }
    }

    fn involves(&self, kind: EntityKind, id: &EntityId) -> bool {
        self.table
            .sides_of(kind)
            .into_iter()
            .any(|side| self.column(side) == id)
    }
}

/// Join rows kept in a single ordered vector
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    rows: RwLock<Vec<LinkRow>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<LinkRow>>, DomainError> {
        self.rows
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Vec<LinkRow>>, DomainError> {
        self.rows
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn linked(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
    ) -> Result<Vec<EntityId>, DomainError> {
        let rows = self.read()?;

        Ok(rows
            .iter()
            .filter(|row| row.table == table && row.column(side) == id)
            .map(|row| row.column(side.opposite()).clone())
            .collect())
    }

    async fn replace(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
        others: &[EntityId],
    ) -> Result<(), DomainError> {
        let others = rows_to_write(table, side, others);
        let mut rows = self.write()?;

        rows.retain(|row| !(row.table == table && row.column(side) == id));

        if table.cardinality() == Cardinality::OneToMany && side == LinkSide::Left {
            rows.retain(|row| !(row.table == table && others.contains(&row.right)));
        }

        for other in others {
            let (left, right) = match side {
                LinkSide::Left => (id.clone(), other),
                LinkSide::Right => (other, id.clone()),
            };
            rows.push(LinkRow { table, left, right });
        }

        Ok(())
    }

    async fn detach(&self, kind: EntityKind, id: &EntityId) -> Result<usize, DomainError> {
        let mut rows = self.write()?;
        let before = rows.len();

        rows.retain(|row| !row.involves(kind, id));

        Ok(before - rows.len())
    }

    async fn clear(&self) -> Result<(), DomainError> {
        self.write()?.clear();
        Ok(())
    }
}
