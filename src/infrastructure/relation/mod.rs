//! Link store implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryLinkStore;
pub use postgres::PostgresLinkStore;

use crate::domain::catalog::EntityId;
use crate::domain::relation::{Cardinality, JoinTable, LinkSide};

/// The ids actually written by `replace` for the given table and side
///
/// Many-to-many tables keep the list as given, duplicates included. On a
/// one-to-many table a right-hand id can only appear once.
fn rows_to_write(table: JoinTable, side: LinkSide, others: &[EntityId]) -> Vec<EntityId> {
    match (table.cardinality(), side) {
        (Cardinality::ManyToMany, _) => others.to_vec(),
        (Cardinality::OneToMany, LinkSide::Left) => {
            let mut unique: Vec<EntityId> = Vec::with_capacity(others.len());
            for id in others {
                if !unique.contains(id) {
                    unique.push(id.clone());
                }
            }
            unique
        }
        (Cardinality::OneToMany, LinkSide::Right) => others.iter().take(1).cloned().collect(),
    }
}
