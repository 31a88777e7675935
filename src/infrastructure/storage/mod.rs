//! Storage infrastructure - entity store implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory, StorageType};
pub use in_memory::InMemoryEntityStore;
pub use postgres::{PostgresConfig, PostgresEntityStore};
