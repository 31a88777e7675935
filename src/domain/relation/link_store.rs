//! Link store trait definition

use std::fmt::Debug;

use async_trait::async_trait;

use super::table::{JoinTable, LinkSide};
use crate::domain::catalog::{EntityId, EntityKind};
use crate::domain::DomainError;

/// Persistence of join-table rows
#[async_trait]
pub trait LinkStore: Send + Sync + Debug {
    /// Ids on the opposite side of every row whose `side` column equals `id`,
    /// in insertion order
    async fn linked(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
    ) -> Result<Vec<EntityId>, DomainError>;

    /// Replaces every row whose `side` column equals `id` with one row per
    /// entry of `others`, in order
    ///
    /// For one-to-many tables, writing from the owning (left) side also
    /// detaches each written member from any previous owner, and a member
    /// listed twice is stored once.
    async fn replace(
        &self,
        table: JoinTable,
        side: LinkSide,
        id: &EntityId,
        others: &[EntityId],
    ) -> Result<(), DomainError>;

    /// Drops every row in which an entity of `kind` with `id` participates,
    /// returning the number of rows removed
    async fn detach(&self, kind: EntityKind, id: &EntityId) -> Result<usize, DomainError>;

    /// Drops every row (tests and seeding)
    async fn clear(&self) -> Result<(), DomainError>;
}
