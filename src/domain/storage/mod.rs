//! Storage domain - generic entity persistence abstraction

mod entity;
mod repository;

pub use entity::{StorageEntity, StorageKey};
pub use repository::EntityStore;

#[cfg(test)]
pub use repository::mock;
